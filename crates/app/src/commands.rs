use std::collections::HashSet;

use services::{AppServices, QuizError};
use study_core::model::{QuestionKind, QuizAnswer, QuizQuestion, TimelineEvent};
use study_core::progress::{BookmarkDraft, BookmarkKind};
use study_core::time::to_iso8601;
use study_core::{CatalogError, ContentCatalog};
use thiserror::Error;
use tracing::debug;

use crate::args::{BookmarkCommand, Command, TimelineFilter};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no {what} with id {id}")]
    NotFound { what: &'static str, id: String },
    #[error("expected {expected} answers, got {given}")]
    AnswerCount { expected: usize, given: usize },
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub async fn execute(app: &AppServices, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    debug!(?command, "executing");
    match command {
        Command::Status => status(app).await,
        Command::Modules => modules(app).await,
        Command::Read { module, card } => read(app, &module, &card).await?,
        Command::Complete { module } => complete(app, &module).await?,
        Command::Quiz { module, answers } => quiz(app, &module, &answers).await?,
        Command::Bookmark(cmd) => bookmark(app, cmd).await,
        Command::Path(path) => set_path(app, path).await?,
        Command::French => {
            let enabled = app.progress().toggle_french_perspective().await;
            println!("French perspective {}", if enabled { "on" } else { "off" });
        }
        Command::Reset => {
            app.progress().reset_progress().await;
            println!("Progress erased.");
        }
        Command::Glossary { query } => glossary(&app.catalog(), &query),
        Command::Timeline(filter) => timeline(&app.catalog(), &filter)?,
        Command::Help => {}
    }
    Ok(())
}

async fn status(app: &AppServices) {
    let catalog = app.catalog();
    let progress = app.progress().snapshot().await;

    println!("Overall progress: {}%", progress.total_progress());
    match progress.current_path() {
        Some(path_id) => {
            let name = catalog
                .get_learning_path_by_id(path_id.as_str())
                .map_or(path_id.as_str(), |path| path.name.as_str());
            println!("Learning path:    {name}");
        }
        None => println!("Learning path:    none"),
    }
    println!(
        "French perspective: {}",
        if progress.french_perspective_enabled() { "on" } else { "off" }
    );
    println!("Quiz attempts:    {}", progress.quiz_attempts().len());
    println!("Last visited:     {}", to_iso8601(progress.last_visited()));

    if !progress.bookmarks().is_empty() {
        println!();
        println!("Bookmarks:");
        for b in progress.bookmarks() {
            println!("  [{}] {} ({})", b.kind, b.title, b.id);
        }
    }
}

async fn modules(app: &AppServices) {
    let catalog = app.catalog();
    let progress = app.progress().snapshot().await;
    for module in catalog.modules() {
        let mark = if progress.is_module_complete(module.id.as_str()) { "x" } else { " " };
        let best = progress
            .best_quiz_attempt(module.id.as_str())
            .map(|a| format!("  best quiz {}/{}", a.score, a.total_questions))
            .unwrap_or_default();
        println!(
            "[{mark}] {:>2}. {} ({})  {}/{} cards, {}%{best}",
            module.number,
            module.title,
            module.estimated_time,
            progress.cards_read_in(module.id.as_str()).len(),
            module.cards.len(),
            progress.module_progress(module.id.as_str()),
        );
    }
}

async fn read(app: &AppServices, module_id: &str, card_id: &str) -> Result<(), CommandError> {
    let catalog = app.catalog();
    let card = catalog
        .get_study_card(module_id, card_id)
        .ok_or_else(|| CommandError::NotFound {
            what: "card",
            id: format!("{module_id}/{card_id}"),
        })?;

    println!("{}", card.title);
    println!();
    println!("{}", card.content);

    let progress = app.progress();
    if progress.read(|p| p.french_perspective_enabled()).await {
        if let Some(french) = &card.french_perspective {
            println!();
            println!("French perspective: {french}");
        }
    }

    progress.mark_card_read(module_id, card_id).await;
    println!();
    println!("Module progress: {}%", progress.module_progress(module_id).await);
    Ok(())
}

async fn complete(app: &AppServices, module_id: &str) -> Result<(), CommandError> {
    let catalog = app.catalog();
    let module = catalog
        .get_module_by_id(module_id)
        .ok_or_else(|| CommandError::NotFound {
            what: "module",
            id: module_id.to_string(),
        })?;

    let progress = app.progress();
    if progress.mark_module_complete(module_id).await {
        println!("Completed: {}", module.title);
    } else {
        println!("Already complete: {}", module.title);
    }
    println!("Overall progress: {}%", progress.total_progress().await);
    Ok(())
}

/// Numbers answer multiple choice questions by 1-based option; anything
/// else is taken as text.
fn to_answer(question: &QuizQuestion, raw: &str) -> QuizAnswer {
    match question.kind {
        QuestionKind::Mcq => match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 => QuizAnswer::Option(n - 1),
            _ => QuizAnswer::Text(raw.to_string()),
        },
        QuestionKind::ShortAnswer => QuizAnswer::Text(raw.to_string()),
    }
}

fn print_question(n: usize, question: &QuizQuestion) {
    println!("{n}. {}", question.question);
    for (i, option) in question.options.iter().enumerate() {
        println!("   {}) {option}", i + 1);
    }
}

async fn quiz(app: &AppServices, module_id: &str, answers: &[String]) -> Result<(), CommandError> {
    let quiz = app.quiz_loop();
    let mut run = quiz.start_quiz(module_id)?;

    if answers.is_empty() {
        let catalog = app.catalog();
        for (i, question) in catalog.get_quiz_questions_for_module(module_id).iter().enumerate() {
            print_question(i + 1, question);
        }
        return Ok(());
    }
    if answers.len() != run.total_questions() {
        return Err(CommandError::AnswerCount {
            expected: run.total_questions(),
            given: answers.len(),
        });
    }

    for (i, raw) in answers.iter().enumerate() {
        let Some(question) = run.current_question().cloned() else {
            break;
        };
        let outcome = quiz.answer_current(&mut run, &to_answer(&question, raw)).await?;
        print_question(i + 1, &question);
        let verdict = if outcome.result.correct { "correct" } else { "incorrect" };
        println!("   {verdict}: {}", question.explanation);

        if let Some(attempt) = outcome.attempt {
            println!();
            println!(
                "Score: {}/{} (recorded as {})",
                attempt.score, attempt.total_questions, attempt.quiz_id
            );
        }
    }
    Ok(())
}

fn default_title(catalog: &ContentCatalog, kind: BookmarkKind, id: &str) -> Option<String> {
    match kind {
        BookmarkKind::Module => catalog.get_module_by_id(id).map(|m| m.title.clone()),
        BookmarkKind::Card => catalog
            .modules()
            .iter()
            .find_map(|m| m.card(id))
            .map(|c| c.title.clone()),
        BookmarkKind::Timeline => catalog.get_timeline_event(id).map(|e| e.title.clone()),
        BookmarkKind::Glossary => catalog.get_glossary_term(id).map(|t| t.term.clone()),
    }
}

async fn bookmark(app: &AppServices, cmd: BookmarkCommand) {
    let progress = app.progress();
    match cmd {
        BookmarkCommand::Add { kind, id, title } => {
            let title = title
                .or_else(|| default_title(&app.catalog(), kind, &id))
                .unwrap_or_else(|| id.clone());
            if progress.add_bookmark(BookmarkDraft::new(kind, id, title)).await {
                println!("Bookmarked.");
            } else {
                println!("Already bookmarked.");
            }
        }
        BookmarkCommand::Remove { kind, id } => {
            if progress.remove_bookmark(kind, &id).await {
                println!("Bookmark removed.");
            } else {
                println!("No such bookmark.");
            }
        }
    }
}

async fn set_path(app: &AppServices, path: Option<String>) -> Result<(), CommandError> {
    let catalog = app.catalog();
    let progress = app.progress();
    let Some(path_id) = path else {
        progress.set_current_path(None).await;
        println!("Learning path cleared.");
        return Ok(());
    };

    let path = catalog
        .get_learning_path_by_id(&path_id)
        .ok_or_else(|| CommandError::NotFound {
            what: "learning path",
            id: path_id.clone(),
        })?;
    progress.set_current_path(Some(path.id.clone())).await;

    println!("{} ({})", path.name, path.estimated_time);
    for module in catalog.get_modules_for_path(&path_id) {
        println!("  {:>2}. {}", module.number, module.title);
    }
    Ok(())
}

fn glossary(catalog: &ContentCatalog, query: &str) {
    let terms = catalog.search_glossary(query);
    if terms.is_empty() {
        println!("No matching terms.");
    }
    for term in terms {
        println!("{}: {}", term.term, term.definition);
    }
}

fn timeline(catalog: &ContentCatalog, filter: &TimelineFilter) -> Result<(), CommandError> {
    let mut events: Vec<&TimelineEvent> = match &filter.range {
        Some((from, to)) => catalog.get_timeline_events_by_date_range(from, to)?,
        None => catalog.timeline().iter().collect(),
    };
    if let Some(category) = filter.category {
        let in_category: HashSet<&str> = catalog
            .get_timeline_events_by_category(category)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        events.retain(|e| in_category.contains(e.id.as_str()));
    }
    if let Some(query) = &filter.search {
        let hits: HashSet<&str> = catalog
            .search_timeline(query)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        events.retain(|e| hits.contains(e.id.as_str()));
    }

    if events.is_empty() {
        println!("No matching events.");
    }
    for event in events {
        let time = event.time.as_deref().map(|t| format!(" {t}")).unwrap_or_default();
        println!("{}{time}  [{}] {}", event.date, event.category, event.title);
        if let Some(location) = &event.location {
            println!("    {location}");
        }
    }
    Ok(())
}
