use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{ArticleFormController, ArticleServiceClient, FolderSource, FormAction, FormProps};
use shared::domain::{ArticleLength, ArticleType, Language, Tone};
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/articles.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateFolder {
        #[arg(long)]
        user_email: String,
        #[arg(long)]
        name: String,
    },
    ListFolders {
        #[arg(long)]
        user_email: String,
    },
    /// Fill the article form and print the submission it produces.
    Draft(DraftArgs),
    Generate {
        #[arg(long)]
        server_url: String,
        #[arg(long)]
        prompt: String,
    },
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    user_email: String,
    /// Load folders from the article server instead of the local database.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value_t = 1000)]
    words_remaining: i64,
    #[arg(long, default_value_t = 1000)]
    total_words: i64,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long)]
    article_type: Option<ArticleType>,
    #[arg(long)]
    project_id: Option<String>,
    #[arg(long, default_value = "")]
    keywords: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    tone: Option<Tone>,
    #[arg(long)]
    length: Option<ArticleLength>,
    #[arg(long)]
    language: Option<Language>,
    #[arg(long)]
    include_images: bool,
    #[arg(long)]
    include_videos: bool,
    #[arg(long)]
    include_sources: bool,
    #[arg(long)]
    web_search: bool,
    #[arg(long)]
    sources: Option<String>,
}

impl DraftArgs {
    fn actions(&self) -> Vec<FormAction> {
        let mut actions = vec![
            FormAction::SetTitle(self.title.clone()),
            FormAction::SetKeywords(self.keywords.clone()),
            FormAction::SetDescription(self.description.clone()),
            FormAction::SetIncludeImages(self.include_images),
            FormAction::SetIncludeVideos(self.include_videos),
            FormAction::SetEnableWebSearch(self.web_search),
            FormAction::SetIncludeSources(self.include_sources),
        ];
        actions.extend(self.article_type.map(FormAction::SetArticleType));
        actions.extend(self.tone.map(FormAction::SetTone));
        actions.extend(self.length.map(FormAction::SetLength));
        actions.extend(self.language.map(FormAction::SetLanguage));
        actions.extend(self.sources.clone().map(FormAction::SetNumberOfSources));
        actions
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::CreateFolder { user_email, name } => {
            let storage = Storage::new(&cli.database_url).await?;
            let folder_id = storage.create_project_folder(&user_email, &name).await?;
            println!("created folder_id={folder_id}");
        }
        Command::ListFolders { user_email } => {
            let storage = Storage::new(&cli.database_url).await?;
            for folder in storage.list_project_folders(&user_email).await? {
                println!("{}\t{}", folder.id, folder.name);
            }
        }
        Command::Draft(args) => {
            let source: Arc<dyn FolderSource> = match &args.server_url {
                Some(url) => Arc::new(ArticleServiceClient::new(url)?),
                None => Arc::new(Storage::new(&cli.database_url).await?),
            };
            draft(args, source).await?;
        }
        Command::Generate { server_url, prompt } => {
            let client = ArticleServiceClient::new(&server_url)?;
            let result = client
                .generate_article_structure(&prompt)
                .await
                .context("generation request failed")?;
            println!("{result}");
        }
    }

    Ok(())
}

async fn draft(args: DraftArgs, source: Arc<dyn FolderSource>) -> Result<()> {
    let submitted = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&submitted);
    let mut controller = ArticleFormController::new(
        FormProps {
            words_remaining: args.words_remaining,
            total_words: args.total_words,
            user_identity: args.user_email.clone(),
        },
        source,
        move |submission| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(submission);
            }
        },
    );
    controller.mount();
    controller.next_folder_update().await;

    for action in args.actions() {
        controller.dispatch(action);
    }
    if let Some(project) = &args.project_id {
        controller.select_project_by_value(project);
    }

    let view = controller.view();
    eprintln!("{}", view.quota_label);
    for option in &view.project_options {
        eprintln!("project {}: {}", option.value, option.label);
    }
    if let Some(warning) = view.quota_warning {
        eprintln!("{warning}");
    }

    controller.submit().context("form was not submitted")?;
    let submission = submitted
        .lock()
        .map_err(|_| anyhow::anyhow!("submission slot poisoned"))?
        .take()
        .context("submit callback was not invoked")?;
    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_flags_become_form_actions() {
        let cli = Cli::try_parse_from([
            "tools",
            "draft",
            "--user-email",
            "ola@example.com",
            "--title",
            "T",
            "--article-type",
            "seo",
            "--language",
            "Svensk",
            "--include-sources",
            "--sources",
            "3",
        ])
        .expect("parse");
        let Command::Draft(args) = cli.command else {
            panic!("expected draft command");
        };
        let state = args
            .actions()
            .into_iter()
            .fold(client_core::FormState::default(), client_core::FormState::apply);
        assert_eq!(state.title, "T");
        assert_eq!(state.article_type, Some(ArticleType::Seo));
        assert_eq!(state.language, Language::Swedish);
        assert_eq!(state.number_of_sources, 3);
        assert!(state.enable_web_search);
    }

    #[test]
    fn unknown_choice_values_are_rejected_by_the_parser() {
        let parsed = Cli::try_parse_from([
            "tools",
            "draft",
            "--user-email",
            "ola@example.com",
            "--tone",
            "grumpy",
        ]);
        assert!(parsed.is_err());
    }
}
