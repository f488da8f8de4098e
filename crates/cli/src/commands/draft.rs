//! Draft command handler.
//!
//! Walks the user through topic, tone, audience, keywords and profile,
//! composes the post, then offers a menu of edits until the user quits.

use clap::Args;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use postcraft_agent::{Draft, HistoryStore, Session, Step};
use postcraft_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Draft a post interactively
#[derive(Args, Debug)]
pub struct DraftCommand {
    /// What the post is about
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Desired tone (e.g. professional, casual, story-driven)
    #[arg(long)]
    pub tone: Option<String>,

    /// Who the post is for
    #[arg(short, long)]
    pub audience: Option<String>,

    /// Comma-separated keywords to include
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// File holding your LinkedIn "About" section
    #[arg(long)]
    pub profile_file: Option<PathBuf>,

    /// Don't ask anything: compose, print and save
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ShowPost,
    Compose,
    ChooseHeadline,
    RegenerateHeadlines,
    RefineHeadline,
    RegenerateBody,
    RefineBody,
    ImproveGrammar,
    EditBody,
    ChooseKeywords,
    ChooseCta,
    RegenerateCtas,
    RefineCta,
    RefineAll,
    Rescore,
    Save,
    Quit,
}

impl Action {
    const MENU: [Action; 17] = [
        Action::ShowPost,
        Action::Compose,
        Action::ChooseHeadline,
        Action::RegenerateHeadlines,
        Action::RefineHeadline,
        Action::RegenerateBody,
        Action::RefineBody,
        Action::ImproveGrammar,
        Action::EditBody,
        Action::ChooseKeywords,
        Action::ChooseCta,
        Action::RegenerateCtas,
        Action::RefineCta,
        Action::RefineAll,
        Action::Rescore,
        Action::Save,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::ShowPost => "Show post",
            Action::Compose => "Compose missing parts",
            Action::ChooseHeadline => "Choose headline",
            Action::RegenerateHeadlines => "Regenerate headlines",
            Action::RefineHeadline => "Refine headline",
            Action::RegenerateBody => "Regenerate body",
            Action::RefineBody => "Refine body",
            Action::ImproveGrammar => "Improve grammar",
            Action::EditBody => "Edit body",
            Action::ChooseKeywords => "Choose adaptive keywords",
            Action::ChooseCta => "Choose call to action",
            Action::RegenerateCtas => "Regenerate calls to action",
            Action::RefineCta => "Refine call to action",
            Action::RefineAll => "Refine whole post",
            Action::Rescore => "Re-score engagement",
            Action::Save => "Save to history",
            Action::Quit => "Quit",
        }
    }
}

fn ui<T>(result: dialoguer::Result<T>) -> AppResult<T> {
    result.map_err(|e| AppError::Other(format!("Prompt failed: {}", e)))
}

fn ask(prompt: &str) -> AppResult<String> {
    ui(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text())
}

/// Optional free-text instruction; empty means the handler's default.
fn ask_instruction() -> AppResult<Option<String>> {
    let text = ask("Instruction (leave empty for default)")?;
    Ok(Some(text).filter(|t| !t.trim().is_empty()))
}

impl DraftCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing draft command");
        tracing::debug!("Draft options: {:?}", self);

        let generator = super::build_generator(config)?;
        let store = HistoryStore::new(config.history_path());
        let mut session = Session::new(generator);

        self.intake(&mut session).await?;

        eprintln!("Composing your post...");
        if self.yes {
            session.compose().await?;
            println!("{}", session.final_text());
            session.save(&store)?;
            return Ok(());
        }

        // Compose only fills what is missing, so a retry keeps earlier parts
        loop {
            match session.compose().await {
                Ok(()) => break,
                Err(e) => {
                    tracing::warn!("Compose failed: {}", e);
                    eprintln!("Notice: {}", e);
                    let retry = ui(Confirm::new()
                        .with_prompt("Try composing again?")
                        .default(true)
                        .interact())?;
                    if !retry {
                        break;
                    }
                }
            }
        }

        print_draft(session.draft());
        menu(&mut session, &store).await
    }

    /// Fill the intake fields from flags, asking for the rest.
    async fn intake(&self, session: &mut Session) -> AppResult<()> {
        let topic = match &self.topic {
            Some(topic) => topic.clone(),
            None if self.yes => {
                return Err(AppError::Config("--topic is required with --yes".to_string()))
            }
            None => ui(Input::<String>::new()
                .with_prompt(intake_label(Step::Topic))
                .interact_text())?,
        };

        let question = session.submit_topic(&topic)?;
        let tone = self.field(&self.tone, session.step(), question)?;

        let question = session.submit_tone(&tone);
        let audience = self.field(&self.audience, session.step(), question)?;

        let question = session.submit_audience(&audience);
        let keywords = self.field(&self.keywords, session.step(), question)?;
        session.submit_keywords(&keywords);

        let profile = match &self.profile_file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read profile file {:?}: {}", path, e))
            })?,
            None if self.yes => String::new(),
            None => ask(intake_label(Step::Profile))?,
        };
        session.submit_profile(&profile).await;

        Ok(())
    }

    /// Flag value, or the user's answer for `step`.
    ///
    /// The input is labelled by the step it fills; the dispatcher's
    /// question is only shown as a hint above it.
    fn field(&self, flag: &Option<String>, step: Step, question: &str) -> AppResult<String> {
        match flag {
            Some(value) => Ok(value.clone()),
            None if self.yes => Ok(String::new()),
            None => {
                eprintln!("Hint: {}", question);
                ask(intake_label(step))
            }
        }
    }
}

/// Input label for the field an intake step fills.
fn intake_label(step: Step) -> &'static str {
    match step {
        Step::Topic => "Enter your post topic",
        Step::Tone => "Enter desired tone (optional)",
        Step::Audience => "Target audience (optional)",
        Step::Keywords => "Keywords to include (comma separated, optional)",
        Step::Profile => "Paste your LinkedIn 'About' section (optional)",
        Step::Compose => "Anything else?",
    }
}

async fn menu(session: &mut Session, store: &HistoryStore) -> AppResult<()> {
    let labels: Vec<&str> = Action::MENU.iter().map(Action::label).collect();
    let mut saved = false;

    loop {
        let choice = ui(Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact())?;
        let action = Action::MENU[choice];

        if action == Action::Quit {
            if !saved
                && ui(Confirm::new()
                    .with_prompt("Save this post before quitting?")
                    .default(true)
                    .interact())?
            {
                session.save(store)?;
            }
            return Ok(());
        }

        match run(session, store, action).await {
            Ok(()) => {
                if action == Action::Save {
                    saved = true;
                    eprintln!("Saved to {:?}", store.path());
                } else if action != Action::ShowPost {
                    saved = false;
                    print_draft(session.draft());
                }
            }
            Err(e) => {
                tracing::warn!(action = action.label(), "Action failed: {}", e);
                eprintln!("Notice: {}", e);
            }
        }
    }
}

async fn run(session: &mut Session, store: &HistoryStore, action: Action) -> AppResult<()> {
    match action {
        Action::ShowPost => {
            println!("{}", session.final_text());
            Ok(())
        }
        Action::Compose => session.compose().await,
        Action::ChooseHeadline => {
            let index = pick("Headline", &session.draft().headlines)?;
            session.select_headline(index)
        }
        Action::RegenerateHeadlines => session.regenerate_headlines().await,
        Action::RefineHeadline => {
            let instruction = ask_instruction()?;
            session.refine_headline(instruction.as_deref(), None).await
        }
        Action::RegenerateBody => session.regenerate_body().await,
        Action::RefineBody => {
            let instruction = ask_instruction()?;
            let mode = ask("Mode (e.g. concise, narrative, punchy; optional)")?;
            let mode = Some(mode).filter(|m| !m.trim().is_empty());
            session
                .refine_body(instruction.as_deref(), mode.as_deref())
                .await
        }
        Action::ImproveGrammar => session.improve_grammar().await,
        Action::EditBody => {
            let current = session.draft().body.clone().unwrap_or_default();
            let body = ui(Input::<String>::new()
                .with_prompt("Body")
                .with_initial_text(current)
                .interact_text())?;
            session.edit_body(&body);
            Ok(())
        }
        Action::ChooseKeywords => {
            let keywords = session.draft().adaptive_keywords.clone();
            if keywords.is_empty() {
                return Err(AppError::Other("No adaptive keywords to choose from".to_string()));
            }
            let defaults: Vec<bool> = keywords
                .iter()
                .map(|k| session.selected_adaptive().contains(k))
                .collect();
            let chosen = ui(MultiSelect::new()
                .with_prompt("Keywords to weave into the body")
                .items(&keywords)
                .defaults(&defaults)
                .interact())?;
            let selection = chosen.into_iter().map(|i| keywords[i].clone()).collect();
            session.set_adaptive_selection(selection).await
        }
        Action::ChooseCta => {
            let index = pick("Call to action", &session.draft().ctas)?;
            session.select_cta(index)
        }
        Action::RegenerateCtas => session.regenerate_ctas().await,
        Action::RefineCta => {
            let instruction = ask_instruction()?;
            session.refine_cta(instruction.as_deref(), None).await
        }
        Action::RefineAll => {
            let instruction = ask_instruction()?;
            session.refine_all(instruction.as_deref()).await
        }
        Action::Rescore => session.rescore().await,
        Action::Save => session.save(store).map(|_| ()),
        Action::Quit => Ok(()),
    }
}

fn pick(what: &str, items: &[String]) -> AppResult<usize> {
    if items.is_empty() {
        return Err(AppError::Other(format!("No {} candidates yet", what.to_lowercase())));
    }
    ui(Select::new().with_prompt(what).items(items).default(0).interact())
}

fn print_draft(draft: &Draft) {
    println!();
    if let Some(headline) = &draft.headline {
        println!("{}\n", headline);
    }
    if let Some(body) = &draft.body {
        println!("{}\n", body);
    }
    if let Some(cta) = &draft.cta {
        println!("{}\n", cta);
    }
    if !draft.hashtags.is_empty() {
        println!("{}\n", draft.hashtags.join(" "));
    }
    if let Some(engagement) = &draft.predicted_engagement {
        eprintln!("Predicted engagement: {}", engagement);
    }
    if !draft.adaptive_keywords.is_empty() {
        eprintln!("Suggested keywords: {}", draft.adaptive_keywords.join(", "));
    }
}
