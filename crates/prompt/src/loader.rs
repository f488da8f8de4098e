//! Loader for per-workspace stage template overrides.
//!
//! Overrides live in `<workspace>/.postcraft/prompts/<id>.yml`.

use crate::types::{PromptDefinition, Stage};
use postcraft_core::config::STATE_DIR;
use postcraft_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(STATE_DIR).join("prompts")
}

/// Load a template override by id.
///
/// # Example
/// ```no_run
/// use postcraft_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = load_prompt(Path::new("."), "headline")?;
/// println!("Override for stage {}", def.stage);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt override from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    Ok(definition)
}

/// List override ids (file stems) in the workspace, sorted.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids: Vec<String> = walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path().is_file() && e.path().extension().and_then(|s| s.to_str()) == Some("yml")
        })
        .filter_map(|e| {
            e.path()
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .collect();

    prompt_ids.sort();
    Ok(prompt_ids)
}

/// Validate an override definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    def.stage.parse::<Stage>()?;

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(format!(
            "Template for stage '{}' cannot be empty",
            def.stage
        )));
    }

    let mut parts = def.api_version.split('.');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
    );
    if !well_formed {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PromptBuilder;
    use crate::types::PromptContext;
    use std::fs;
    use tempfile::TempDir;

    fn write_override(dir: &Path, id: &str, body: &str) {
        let prompts = prompts_dir(dir);
        fs::create_dir_all(&prompts).unwrap();
        fs::write(prompts.join(format!("{}.yml", id)), body).unwrap();
    }

    const VALID: &str = r#"
stage: cta
title: "Question-style CTAs"
apiVersion: "1.0"
template: "Suggest 3 questions to end a post about '{{topic}}'."
"#;

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "cta", VALID);

        let prompt = load_prompt(temp_dir.path(), "cta").unwrap();
        assert_eq!(prompt.stage, "cta");
        assert_eq!(prompt.title, "Question-style CTAs");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "headline").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "broken", "stage: [cta");
        assert!(matches!(
            load_prompt(temp_dir.path(), "broken"),
            Err(AppError::Prompt(_))
        ));
    }

    #[test]
    fn test_load_unknown_stage() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "poem",
            "stage: poem\napiVersion: \"1.0\"\ntemplate: \"x\"\n",
        );
        assert!(matches!(
            load_prompt(temp_dir.path(), "poem"),
            Err(AppError::InvalidStage(_))
        ));
    }

    #[test]
    fn test_bad_api_version() {
        let temp_dir = TempDir::new().unwrap();
        write_override(
            temp_dir.path(),
            "cta",
            "stage: cta\napiVersion: \"v1\"\ntemplate: \"x\"\n",
        );
        assert!(load_prompt(temp_dir.path(), "cta").is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "cta", VALID);
        write_override(temp_dir.path(), "body", VALID);
        fs::write(prompts_dir(temp_dir.path()).join("notes.txt"), "ignored").unwrap();

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["body".to_string(), "cta".to_string()]);
    }

    #[test]
    fn test_list_prompts_without_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_prompts(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_builder_applies_override() {
        let temp_dir = TempDir::new().unwrap();
        write_override(temp_dir.path(), "cta", VALID);

        let builder = PromptBuilder::with_overrides(temp_dir.path()).unwrap();
        let prompt = builder
            .render(Stage::Cta, &PromptContext::new().with_topic(Some("AI")))
            .unwrap();
        assert_eq!(prompt, "Suggest 3 questions to end a post about 'AI'.");

        // Other stages keep their defaults
        let headline = builder
            .render(Stage::Headline, &PromptContext::new().with_topic(Some("AI")))
            .unwrap();
        assert!(headline.starts_with("Write 3 catchy LinkedIn headlines"));
    }
}
