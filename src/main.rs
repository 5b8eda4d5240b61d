//! Tetotype CLI
//!
//! Usage:
//!   tetotype                                  # Interactive: home → survey → result
//!   tetotype --gender female --lang ko        # Skip home, start the survey
//!   tetotype --open "<share link>"            # Show a shared result
//!   tetotype --open "<share link>" --json     # Print a shared result as JSON
//!   tetotype --api-base http://localhost:4000 # Use another API server

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tetotype::core::survey::UNANSWERED_MESSAGE;
use tetotype::core::{
    build_share_link, copy_text, initial_language, share_result, Clipboard, CommandClipboard, CommandShare,
    CommandSnapshotRenderer, Exporter, HttpBackend, NativeShare, PreferenceStore, ResultView, Route,
    ShareOutcome, SurveyFlow, SystemClipboard, TranslationStore,
};
use tetotype::types::{Answer, EmptyAnswerPolicy, FlowPhase, Gender, Language, SurveyError, Theme, TypeResult};
use tetotype::{DEFAULT_API_BASE, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "tetotype",
    version = VERSION,
    about = "Teto/Egen personality survey in the terminal",
    long_about = "Answer the survey questions and find out your type.\n\n\
                  Screens:\n  \
                  HOME    - pick a gender, language and theme\n  \
                  SURVEY  - answer each question (option number or free text)\n  \
                  RESULT  - read, save, copy or share your result"
)]
struct Args {
    /// API origin serving /api/questions, /api/evaluate and /api/i18n
    #[arg(long, env = "TETOTYPE_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Language (ko, en, jp, vn); defaults to the saved choice or the system locale
    #[arg(short, long, env = "TETOTYPE_LANG")]
    lang: Option<Language>,

    /// Start the survey directly with this gender (male/female)
    #[arg(short, long, env = "TETOTYPE_GENDER")]
    gender: Option<Gender>,

    /// Open a share link and show its result
    #[arg(long, value_name = "LINK")]
    open: Option<String>,

    /// Colour theme (light/dark)
    #[arg(long, env = "TETOTYPE_THEME", default_value = "light")]
    theme: Theme,

    /// Directory for result.json / result.html / result.png
    #[arg(long, env = "TETOTYPE_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Origin used when building share links
    #[arg(long, env = "TETOTYPE_ORIGIN", default_value = DEFAULT_API_BASE)]
    origin: String,

    /// Path used when building share links
    #[arg(long, env = "TETOTYPE_SHARE_PATH", default_value = "/")]
    share_path: String,

    /// Print the result as JSON instead of rendering it
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Command receiving text on stdin for clipboard copies, instead of the system clipboard
    #[arg(long, env = "TETOTYPE_CLIPBOARD_CMD")]
    clipboard_cmd: Option<String>,

    /// Command run with the share URL appended; without it links are copied
    #[arg(long, env = "TETOTYPE_SHARE_CMD")]
    share_cmd: Option<String>,

    /// HTML-to-PNG command, run as `<cmd> <input.html> <output.png>`
    #[arg(long, env = "TETOTYPE_SNAPSHOT_CMD", default_value = "wkhtmltoimage --quiet")]
    snapshot_cmd: String,

    /// Let an empty free-text answer count as answered
    #[arg(long)]
    allow_empty_answers: bool,

    /// Do not read or write the saved language preference
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let prefs = if args.no_save {
        PreferenceStore::disabled()
    } else {
        PreferenceStore::default_location()
    };
    let language = args.lang.unwrap_or_else(|| initial_language(&prefs));

    let start = if let Some(ref link) = args.open {
        Route::from_location(link)
    } else if let Some(gender) = args.gender {
        Route::Survey { gender: Some(gender) }
    } else {
        Route::Home
    };

    // Nothing to display, so no translations and no saved preference
    if args.json && args.open.is_some() {
        return print_json_result(start);
    }

    let mut app = App::new(&args, TranslationStore::new(language, prefs));
    app.i18n.load(&*app.backend, language).await;
    app.run(start).await
}

/// `--open <link> --json`: decode and print, no interaction
fn print_json_result(route: Route) -> anyhow::Result<()> {
    match route {
        Route::Result(Some(result)) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        _ => {
            let err = SurveyError::DecodeError("link carries no result".to_string());
            println!("{}", serde_json::json!({ "error": err.code(), "message": err.message() }));
            std::process::exit(1);
        }
    }
}

/// Interactive shell state shared by every screen
struct App<'a> {
    args: &'a Args,
    backend: Arc<HttpBackend>,
    i18n: TranslationStore,
    theme: Theme,
    input: Box<dyn BufRead>,
}

impl<'a> App<'a> {
    fn new(args: &'a Args, i18n: TranslationStore) -> Self {
        Self {
            args,
            backend: Arc::new(HttpBackend::new(&args.api_base)),
            i18n,
            theme: args.theme,
            input: Box::new(io::BufReader::new(io::stdin())),
        }
    }

    fn t(&self, key: &str, fallback: &str) -> String {
        self.i18n.get_or(key, fallback)
    }

    /// Prompt and read one trimmed line; `None` on end of input
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn heading(&self, text: &str) -> String {
        match self.theme {
            Theme::Light => text.bold().blue().to_string(),
            Theme::Dark => text.bold().bright_cyan().to_string(),
        }
    }

    fn alert(&self, text: &str) {
        println!("{}", format!("⚠ {}", text).yellow());
    }

    /// Route loop; returns when the user quits or input ends
    async fn run(&mut self, start: Route) -> anyhow::Result<()> {
        let mut route = Some(start);
        while let Some(current) = route {
            tracing::info!(route = current.path(), "entering screen");
            route = match current {
                Route::Home => self.home().await,
                Route::Survey { gender } => self.survey(gender).await,
                Route::Result(result) => self.result(result),
            };
        }
        Ok(())
    }

    /// Global controls available on every screen: `:lang <code>`, `:theme`
    async fn handle_global(&mut self, line: &str) -> bool {
        if let Some(code) = line.strip_prefix(":lang") {
            match code.trim().parse::<Language>() {
                Ok(lang) => {
                    self.i18n.set_language(&*self.backend, lang).await;
                    println!("→ {}", lang.native_name());
                }
                Err(e) => self.alert(&e),
            }
            return true;
        }
        if line == ":theme" {
            self.theme = self.theme.toggled();
            return true;
        }
        false
    }

    // =========================================================================
    // HOME
    // =========================================================================

    async fn home(&mut self) -> Option<Route> {
        let mut selected: Option<Gender> = None;

        loop {
            println!();
            println!("{}", self.heading(&self.t("home.title", "Gender Test")));
            if let Some(intro) = self.i18n.lookup("home.intro_ai_message") {
                println!("{}", intro.bold());
            }
            println!("{}", self.t("home.subtitle", &self.t("home.description", "")));
            println!();

            for (key, gender) in [("m", Gender::Male), ("f", Gender::Female)] {
                let label = self.t(gender.label_key(), if gender == Gender::Male { "Male" } else { "Female" });
                let entry = format!("[{}] {}", key, label);
                if selected == Some(gender) {
                    println!("  {}", entry.bold().green());
                } else {
                    println!("  {}", entry);
                }
            }
            println!(
                "  [s] {}   :lang {}   :theme ({})   :quit",
                self.t("home.start_button", "Start"),
                self.i18n.language(),
                self.t(self.theme.toggle_label_key(), "Theme"),
            );

            let line = self.read_line("> ")?;
            if self.handle_global(&line).await {
                continue;
            }
            match line.as_str() {
                ":quit" | "quit" | "exit" => return None,
                "s" | "start" => match selected {
                    Some(gender) => return Some(Route::Survey { gender: Some(gender) }),
                    None => self.alert(&self.t("home.gender_select_alert", "Please select a gender.")),
                },
                other => match other.parse::<Gender>() {
                    Ok(gender) => selected = Some(gender),
                    Err(_) => self.alert(&self.t("home.gender_select_alert", "Please select a gender.")),
                },
            }
        }
    }

    // =========================================================================
    // SURVEY
    // =========================================================================

    async fn survey(&mut self, gender: Option<Gender>) -> Option<Route> {
        let policy = if self.args.allow_empty_answers {
            EmptyAnswerPolicy::CountsAsAnswered
        } else {
            EmptyAnswerPolicy::CountsAsUnanswered
        };
        let mut flow = SurveyFlow::new(self.backend.clone()).with_policy(policy);

        println!("{}", self.t("survey.loading", "Loading questions...").dimmed());
        if let Err(e) = flow.initialize(gender, self.i18n.language()).await {
            println!("{} {}", self.t("survey.error", "Error:").red(), e.message().red());
            println!("[h] {}", self.t("survey.go_home_button", "Go to Home"));
            return match self.read_line("> ")?.as_str() {
                ":quit" | "quit" | "exit" => None,
                _ => Some(Route::Home),
            };
        }

        loop {
            self.render_question(&flow);

            let line = self.read_line("> ")?;
            if self.handle_global(&line).await {
                continue;
            }

            let outcome = match line.as_str() {
                ":quit" | "quit" | "exit" => return None,
                ":home" => return Some(Route::Home),
                ":prev" | ":p" => {
                    flow.retreat();
                    Ok(())
                }
                "" | ":next" | ":n" if flow.is_last_step() => {
                    println!("{}", self.t("survey.submitting", "Submitting...").yellow());
                    match flow.submit().await {
                        Ok(result) => return Some(Route::Result(Some(result))),
                        Err(e) => Err(e),
                    }
                }
                "" | ":next" | ":n" => flow.advance().map(|_| ()),
                other => self.record_input(&mut flow, other),
            };

            if let Err(e) = outcome {
                match e {
                    SurveyError::ValidationError(_) => {
                        self.alert(&self.t("survey.submit_button_alert", UNANSWERED_MESSAGE))
                    }
                    other => println!("{} {}", self.t("survey.error", "Error:").red(), other.message().red()),
                }
            }
        }
    }

    /// A number picks an option; `:text ...` or anything else is free text
    fn record_input(&self, flow: &mut SurveyFlow, line: &str) -> Result<(), SurveyError> {
        let Some(question) = flow.current_question().map(|q| q.question.clone()) else {
            return Ok(());
        };
        if let Some(text) = line.strip_prefix(":text") {
            return flow.record_free_text(&question, text.trim());
        }

        let options = flow.current_options();
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => flow.record_option(&question, &options[n - 1]),
            _ => flow.record_free_text(&question, line),
        }
    }

    fn render_question(&self, flow: &SurveyFlow) {
        println!();
        let prompt = self
            .i18n
            .lookup(&flow.prompt_key())
            .map(str::to_string)
            .unwrap_or_else(|| self.t("survey.description", "Please answer all questions."));
        println!("{}", prompt);

        let progress = flow.progress();
        let filled = (progress.percent / 5.0).round() as usize;
        println!(
            "{} / {}  [{}{}]",
            progress.current,
            progress.total,
            "█".repeat(filled).green(),
            "░".repeat(20usize.saturating_sub(filled))
        );

        let Some(question) = flow.current_question() else {
            println!("{}", self.t("survey.not_found", "No questions found."));
            println!(":home {}", self.t("survey.go_home_button", "Go to Home"));
            return;
        };

        println!();
        println!("{}", question.question.bold());
        let answer = flow.answer_for(&question.question);
        let options = question.option_list();
        for (idx, option) in options.iter().enumerate() {
            let entry = format!("  [{}] {}", idx + 1, option);
            if answer.selected_option() == Some(option.as_str()) {
                println!("{}", entry.bold().blue());
            } else {
                println!("{}", entry);
            }
        }
        if !options.is_empty() {
            println!("{}", self.t("survey.or_text", "or").dimmed());
        }
        let typed = match answer {
            Answer::FreeText(text) => text.as_str(),
            _ => "",
        };
        println!(
            "  {}: {}",
            self.t("survey.free_text_placeholder", "Enter your answer").dimmed(),
            typed
        );

        let next_label = if flow.is_last_step() {
            self.t("survey.submit_button", "View Result")
        } else {
            self.t("survey.next_button", "Next")
        };
        let next = if flow.current_is_answered() {
            next_label.green().to_string()
        } else {
            next_label.dimmed().to_string()
        };
        let prev = if flow.step() > 0 {
            format!(":prev {}   ", self.t("survey.previous_button", "Previous"))
        } else {
            String::new()
        };
        println!(
            "{}:next {}   :home {}",
            prev,
            next,
            self.t("survey.go_home_button", "Go to Home")
        );

        if let FlowPhase::Answering(_) = flow.phase() {
            if let Some(err) = flow.last_error() {
                println!("{}", err.message().red());
            }
        }
    }

    // =========================================================================
    // RESULT
    // =========================================================================

    fn result(&mut self, result: Option<TypeResult>) -> Option<Route> {
        let Some(result) = result else {
            println!();
            println!(
                "{}",
                self.t("result.not_found", "Could not retrieve results. Please take the survey again.")
            );
            println!("[h] {}", self.t("result.go_home_button", "Go to Home"));
            return match self.read_line("> ")?.as_str() {
                ":quit" | "quit" | "exit" => None,
                _ => Some(Route::Home),
            };
        };

        if self.args.json {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::warn!("Cannot print result: {}", e),
            }
            return None;
        }

        let clipboard: Box<dyn Clipboard> = match &self.args.clipboard_cmd {
            Some(cmd) => Box::new(CommandClipboard::new(cmd)),
            None => Box::new(SystemClipboard::new()),
        };
        let native = self.args.share_cmd.as_deref().map(CommandShare::new);
        let renderer = CommandSnapshotRenderer::new(&self.args.snapshot_cmd);

        loop {
            let exporter = Exporter::new(&self.args.output_dir, self.theme);
            let view = ResultView::new(&result, &self.i18n);
            println!();
            print!("{}", view.to_terminal_string(self.args.no_color));
            println!();
            println!(
                "[save] {}  [copy] {}  [html] {}  [image] {}  [share] {}  [home] {}",
                self.t("result.save_button", "Save Result"),
                self.t("result.copy_text", "Copy Text"),
                self.t("result.save_html", "Save as HTML"),
                self.t("result.save_image", "Save as Image"),
                self.t("result.share_button", "Share"),
                self.t("result.go_home_button", "Retake Survey"),
            );

            let line = self.read_line("> ")?;
            let view = ResultView::new(&result, &self.i18n);
            match line.as_str() {
                ":quit" | "quit" | "exit" => return None,
                "home" | ":home" => return Some(Route::Home),
                ":theme" => self.theme = self.theme.toggled(),
                "save" => report_export(exporter.save_json(&result)),
                "html" => report_export(exporter.save_html(&view)),
                "image" => report_export(exporter.save_image(&view, &renderer)),
                "copy" => match copy_text(&view, clipboard.as_ref()) {
                    Ok(()) => println!("✓"),
                    Err(e) => tracing::warn!("Copy failed: {}", e),
                },
                "share" => {
                    let url = match build_share_link(&self.args.origin, &self.args.share_path, &result) {
                        Ok(url) => url,
                        Err(e) => {
                            tracing::warn!("Cannot build share link: {}", e);
                            continue;
                        }
                    };
                    let title = view.title();
                    match share_result(&title, &url, native.as_ref().map(|n| n as &dyn NativeShare), clipboard.as_ref()) {
                        ShareOutcome::Shared => println!("✓"),
                        ShareOutcome::Copied(_) => {
                            println!("{}", self.t("result.share_copied", "Link copied to clipboard"))
                        }
                        ShareOutcome::Failed(_) => println!("{}", url),
                    }
                }
                _ => {}
            }
        }
    }
}

/// Exports report the written path; failures are logged only
fn report_export(outcome: Result<PathBuf, SurveyError>) {
    match outcome {
        Ok(path) => println!("✓ {}", path.display()),
        Err(e) => tracing::warn!("{}: {}", e.code(), e),
    }
}
