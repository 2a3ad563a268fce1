mod questionnaire;

use std::io::{self, Write};
use std::sync::Arc;

use log::{info, warn};

use crate::assessment::report::{self, format_result};
use crate::assessment::snapshot::{load_snapshot, save_snapshot};
use crate::assessment::{
    self, compute_result, question_bank, record_answer, AnswerSet, AssessmentSnapshot,
};
use crate::cli::{
    AssessArgs, ChatArgs, Command, CredentialArgs, OutputFormat, QuestionsArgs, ResultArgs,
};
use crate::coach::conversation::{clear_history, load_history, save_history};
use crate::coach::{ChatRole, CoachClient, CoachConfig, CoachError, Conversation, GUEST_USER_ID};
use crate::session::{SessionError, SessionManager};
use crate::store::{load_json, save_json, SessionStore, StoreError};

pub use questionnaire::run_questionnaire;

/// Store key for the answers behind the latest saved result.
pub const ASSESSMENT_ANSWERS_KEY: &str = "assessment_answers";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Assessment(#[from] assessment::AssessmentError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Coach(#[from] CoachError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    User(String),
}

pub struct App<S: SessionStore> {
    session: SessionManager<S>,
    coach_config: CoachConfig,
    client: Option<Arc<dyn CoachClient>>,
}

impl<S: SessionStore> App<S> {
    pub fn new(store: S, coach_config: CoachConfig) -> Self {
        Self {
            session: SessionManager::new(store),
            coach_config,
            client: None,
        }
    }

    /// Use `client` instead of building an HTTP client from the config.
    pub fn with_client(mut self, client: Arc<dyn CoachClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn store(&self) -> &S {
        self.session.store()
    }

    pub fn run<W: Write>(&mut self, command: Command, out: &mut W) -> Result<(), AppError> {
        match command {
            Command::Questions(opts) => self.handle_questions(opts, out),
            Command::Assess(opts) => self.handle_assess(opts, out),
            Command::LastResult(opts) => self.handle_result(opts, out),
            Command::Chat(opts) => self.handle_chat(opts, out),
            Command::Signup(opts) => self.handle_sign_in(opts, true, out),
            Command::Login(opts) => self.handle_sign_in(opts, false, out),
            Command::Logout => self.handle_logout(out),
            Command::Whoami => self.handle_whoami(out),
            Command::Health => self.handle_health(out),
        }
    }

    fn handle_questions<W: Write>(&self, opts: QuestionsArgs, out: &mut W) -> Result<(), AppError> {
        let bank = question_bank();
        if opts.format == OutputFormat::Json {
            writeln!(out, "{}", serde_json::to_string_pretty(bank.questions())?)?;
            return Ok(());
        }

        for question in bank.iter() {
            writeln!(out, "{}. [{}] {}", question.id, question.category.name(), question.prompt)?;
            for option in &question.options {
                writeln!(out, "   {}) {}", option.id, option.label)?;
            }
        }
        Ok(())
    }

    fn handle_assess<W: Write>(&mut self, opts: AssessArgs, out: &mut W) -> Result<(), AppError> {
        let bank = question_bank();
        let answers = match opts.answers {
            Some(pairs) => pairs
                .into_iter()
                .try_fold(AnswerSet::new(), |answers, (question, option)| {
                    record_answer(answers, bank, question, option)
                })?,
            None => {
                let stdin = io::stdin();
                run_questionnaire(bank, stdin.lock(), out)?
            }
        };

        if !answers.is_complete(bank) {
            warn!(
                "Answered {} of {} questions; scoring the answered ones only",
                answers.len(),
                bank.len()
            );
        }

        let result = compute_result(&answers, bank)?;
        let name = match opts.name {
            Some(name) => Some(name),
            None => self.session.profile()?.map(|p| p.name),
        };

        writeln!(
            out,
            "{}",
            format_result(&result, name.as_deref(), convert_format(opts.format))
        )?;

        if !opts.no_save {
            let snapshot = AssessmentSnapshot::from_result(&result, name.as_deref());
            save_snapshot(self.store(), &snapshot)?;
            save_json(self.store(), ASSESSMENT_ANSWERS_KEY, &answers)?;
            info!("Saved assessment result for the coach");
        }
        Ok(())
    }

    fn handle_result<W: Write>(&self, opts: ResultArgs, out: &mut W) -> Result<(), AppError> {
        let bank = question_bank();
        let answers: AnswerSet = load_json(self.store(), ASSESSMENT_ANSWERS_KEY)?.ok_or_else(|| {
            AppError::User("No saved assessment. Run `fincoach assess` first.".to_string())
        })?;
        let result = compute_result(&answers, bank)?;
        let name = load_snapshot(self.store())?.map(|s| s.user_name);

        writeln!(
            out,
            "{}",
            format_result(&result, name.as_deref(), convert_format(opts.format))
        )?;
        Ok(())
    }

    fn handle_chat<W: Write>(&self, opts: ChatArgs, out: &mut W) -> Result<(), AppError> {
        let store = self.store();
        if opts.reset {
            clear_history(store)?;
            info!("Started a new conversation");
        }

        let user_id = self
            .session
            .current_user()?
            .map(|u| u.uid)
            .unwrap_or_else(|| GUEST_USER_ID.to_string());
        let snapshot = load_snapshot(store)?;
        let mut conversation = Conversation::resume(user_id, snapshot, load_history(store)?);

        let message = opts.message.join(" ");
        if message.trim().is_empty() {
            for entry in conversation.messages() {
                let speaker = match entry.role {
                    ChatRole::User => "You",
                    ChatRole::Assistant => "Coach",
                };
                writeln!(out, "{}: {}\n", speaker, entry.content)?;
            }
            save_history(store, &conversation)?;
            return Ok(());
        }

        let client = self.client()?;
        let outcome = conversation
            .send(client.as_ref(), &message)
            .map(|reply| reply.map(|m| m.content.clone()));
        save_history(store, &conversation)?;

        match outcome {
            Ok(Some(reply)) => {
                writeln!(out, "Coach: {}", reply)?;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                if let Some(fallback) = conversation.messages().last() {
                    writeln!(out, "Coach: {}", fallback.content)?;
                }
                Err(e.into())
            }
        }
    }

    fn handle_sign_in<W: Write>(
        &self,
        opts: CredentialArgs,
        new_account: bool,
        out: &mut W,
    ) -> Result<(), AppError> {
        let user = if new_account {
            self.session.sign_up(&opts.email, &opts.password)?
        } else {
            self.session.sign_in(&opts.email, &opts.password)?
        };
        writeln!(out, "Signed in as {} ({})", user.display_name, user.uid)?;
        Ok(())
    }

    fn handle_logout<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        self.session.sign_out()?;
        writeln!(out, "Signed out")?;
        Ok(())
    }

    fn handle_whoami<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        match self.session.profile()? {
            Some(profile) => writeln!(
                out,
                "{} <{}> ({}), member since {}",
                profile.name, profile.email, profile.user_id, profile.created_at
            )?,
            None => writeln!(out, "Not signed in")?,
        }
        Ok(())
    }

    fn handle_health<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        let status = self.client()?.health()?;
        writeln!(out, "{}", status)?;
        Ok(())
    }

    fn client(&self) -> Result<Arc<dyn CoachClient>, AppError> {
        match &self.client {
            Some(client) => Ok(Arc::clone(client)),
            None => Ok(self.coach_config.create_client()?),
        }
    }
}

fn convert_format(format: OutputFormat) -> report::OutputFormat {
    match format {
        OutputFormat::Pretty => report::OutputFormat::Pretty,
        OutputFormat::Json => report::OutputFormat::Json,
        OutputFormat::Markdown => report::OutputFormat::Markdown,
        OutputFormat::Compact => report::OutputFormat::Compact,
    }
}
