//! Line-oriented terminal driver for a quiz session.

use content::ContentSource;
use estrela_core::Intensity;
use estrela_core::model::{CategoryId, Face, Hint, Limit, QuizSettings};
use services::{Celebration, ExitTarget, Phase, SessionRunner, SessionView, Step};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Prints a row of confetti sized by intensity.
pub struct Confetti;

impl Celebration for Confetti {
    fn celebrate(&self, intensity: Intensity) {
        let width = usize::try_from(intensity.particle_count() / 4).unwrap_or(50);
        println!("{}", "*".repeat(width));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Reveal,
    Judge(bool),
    Toggle(CategoryId),
    SelectAll,
    ClearAll,
    Limit(Limit),
    Start,
    Retry,
    PracticeMissed,
    Exit,
    Help,
}

fn parse_action(line: &str) -> Result<Action, String> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let arg = words.next();
    let action = match (head, arg) {
        ("r" | "reveal", None) => Action::Reveal,
        ("y" | "yes", None) => Action::Judge(true),
        ("n" | "no", None) => Action::Judge(false),
        ("t" | "toggle", Some(id)) => {
            Action::Toggle(id.parse().map_err(|e| format!("{e}"))?)
        }
        ("all", None) => Action::SelectAll,
        ("none", None) => Action::ClearAll,
        ("limit", Some(limit)) => Action::Limit(limit.parse().map_err(|e| format!("{e}"))?),
        ("s" | "start", None) => Action::Start,
        ("retry", None) => Action::Retry,
        ("m" | "missed", None) => Action::PracticeMissed,
        ("q" | "exit", None) => Action::Exit,
        ("?" | "help", None) => Action::Help,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(action)
}

fn print_help(phase: Phase) {
    match phase {
        Phase::Setup => println!(
            "commands: t <category> | all | none | limit <n|all> | start | exit"
        ),
        Phase::Quiz | Phase::Recap => println!("commands: r (reveal) | y | n | exit"),
        Phase::Results => println!("commands: retry | missed | exit"),
    }
}

/// Runs the session until the learner leaves or stdin closes.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub async fn run(
    mut runner: SessionRunner,
    settings: &QuizSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(&runner, settings);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(msg) => {
                println!("! {msg}");
                print_help(runner.phase());
                continue;
            }
        };
        debug!(?action, "input");

        let result = match action {
            Action::Help => {
                print_help(runner.phase());
                continue;
            }
            Action::Exit => match runner.exit() {
                ExitTarget::Setup(next) => {
                    runner = next;
                    render(&runner, settings);
                    continue;
                }
                ExitTarget::Leave => return Ok(()),
            },
            Action::Reveal => runner.reveal(),
            Action::Judge(correct) => runner.judge(correct),
            Action::Toggle(id) => runner.toggle_category(&id).map(|()| Step::Applied),
            Action::SelectAll => runner.select_all().map(|()| Step::Applied),
            Action::ClearAll => runner.clear_categories().map(|()| Step::Applied),
            Action::Limit(limit) => runner.set_limit(limit).map(|()| Step::Applied),
            Action::Start => runner.start().map(|()| Step::Applied),
            Action::Retry => runner.retry().map(|()| Step::Applied),
            Action::PracticeMissed => runner.practice_missed().map(|()| Step::Applied),
        };

        match result {
            Ok(Step::Pending(ticket)) => {
                tokio::time::sleep(settings.transition()).await;
                runner.complete_transition(ticket)?;
            }
            Ok(Step::Dropped) => continue,
            Ok(Step::Applied | Step::Finished(_)) => {}
            Err(err) => {
                println!("! {err}");
                continue;
            }
        }
        render(&runner, settings);
    }
    Ok(())
}

fn render(runner: &SessionRunner, settings: &QuizSettings) {
    let view = runner.view();
    match view.phase {
        Phase::Setup => render_setup(runner, settings),
        Phase::Quiz | Phase::Recap => render_card(&view),
        Phase::Results => render_results(&view),
    }
    print_help(view.phase);
}

fn render_setup(runner: &SessionRunner, settings: &QuizSettings) {
    let session = runner.session();
    println!("── setup ──");
    for category in session.pool().categories() {
        let mark = if session.is_selected(category) { 'x' } else { ' ' };
        println!("  [{mark}] {category}");
    }
    let choices: Vec<String> = session
        .limit_choices(settings.limit_options())
        .into_iter()
        .map(|choice| {
            let label = match choice.limit {
                Limit::All => format!("all ({})", session.eligible_count()),
                Limit::Count(n) => n.to_string(),
            };
            match (choice.selected, choice.enabled) {
                (true, _) => format!("<{label}>"),
                (false, true) => label,
                (false, false) => format!("-{label}-"),
            }
        })
        .collect();
    println!("  count: {}", choices.join("  "));
}

fn render_card(view: &SessionView<'_>) {
    let header = if view.phase == Phase::Recap {
        format!("recap {}", view.recap_pass)
    } else {
        format!("✓ {}", view.correct)
    };
    println!(
        "── {} / {} ── {}% ── {header}",
        view.position + 1,
        view.pass_len,
        view.progress_percent
    );
    if let Some(prompt) = &view.prompt {
        print!("{}", face_lines(prompt));
    }
    if let Some(answer) = &view.answer {
        println!("  ↓");
        print!("{}", face_lines(answer));
    }
}

fn render_results(view: &SessionView<'_>) {
    let Some(results) = &view.results else {
        return;
    };
    let score = results.score;
    println!(
        "── results ── {} / {} ({}%) {:?}",
        score.correct(),
        score.total(),
        score.percent(),
        score.tier()
    );
    if let Some(praise) = results.praise {
        println!("  {praise}");
    }
    if results.can_practice_missed {
        println!("  missed: {}", results.missed_count);
    }
}

fn face_lines(face: &Face<'_>) -> String {
    let mut out = format!("  [{}] {}\n", face.lang.tag(), face.text);
    for hint in &face.hints {
        let label = match hint {
            Hint::BaseForm(_) => "base",
            Hint::Instruction(_) => "task",
            Hint::Translation(_) => "translation",
        };
        out.push_str(&format!("      {label} ({}): {}\n", hint.lang().tag(), hint.text()));
    }
    out
}

/// Prints the catalog as a short listing with quiz scopes.
pub fn print_catalog(content: &dyn ContentSource) {
    println!("vocabulary");
    for category in content.categories() {
        println!(
            "  vocab:{:<24} {} {} ({} words)",
            category.id.as_str(),
            category.icon,
            category.title_he,
            category.word_count()
        );
    }
    println!("grammar");
    for topic in content.topics() {
        println!(
            "  grammar:{:<22} {} {} ({} sentences)",
            topic.id.as_str(),
            topic.icon,
            topic.title_he,
            topic.sentences.len()
        );
    }
    println!("songs");
    for song in content.songs() {
        println!("  {} ({})", song.title, song.id);
        println!("    song-words:{}      {} words", song.id, song.vocab.len());
        println!("    song-sentences:{}  {} lines", song.id, song.sentences.len());
        if let Some(url) = &song.media_url {
            println!("    listen: {url}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estrela_core::model::Lang;

    #[test]
    fn parses_quiz_commands() {
        assert_eq!(parse_action("r"), Ok(Action::Reveal));
        assert_eq!(parse_action(" y "), Ok(Action::Judge(true)));
        assert_eq!(parse_action("no"), Ok(Action::Judge(false)));
        assert_eq!(parse_action("missed"), Ok(Action::PracticeMissed));
        assert_eq!(parse_action("q"), Ok(Action::Exit));
    }

    #[test]
    fn parses_setup_commands() {
        assert_eq!(
            parse_action("t food"),
            Ok(Action::Toggle(CategoryId::new("food").unwrap()))
        );
        assert_eq!(parse_action("limit 20"), Ok(Action::Limit(Limit::Count(20))));
        assert_eq!(parse_action("limit all"), Ok(Action::Limit(Limit::All)));
        assert!(parse_action("limit").is_err());
        assert!(parse_action("t a/b").is_err());
        assert!(parse_action("dance").is_err());
    }

    #[test]
    fn face_lines_include_hints() {
        let face = Face::plain(Lang::Pt, "Eu ___ cansado.").with_hint(Hint::BaseForm("estar"));
        assert_eq!(
            face_lines(&face),
            "  [pt] Eu ___ cansado.\n      base (pt): estar\n"
        );
    }
}
