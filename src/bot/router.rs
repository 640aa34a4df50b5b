use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Command, KeywordMatcher, Matcher, ReplySink};
use crate::analysis::{Analyzer, ReportSettings};
use crate::config::AppConfig;
use crate::io::save_results;
use crate::models::Dataset;
use crate::report;

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// Menu buttons to show with this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<Vec<String>>>,
    /// Delivered after the router's pacing delay
    #[serde(skip)]
    pub paced: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            paced: false,
        }
    }

    pub fn with_keyboard(mut self) -> Self {
        self.keyboard = Some(Command::keyboard());
        self
    }

    fn paced(mut self) -> Self {
        self.paced = true;
        self
    }
}

/// Maps inbound text to report replies over a shared dataset.
pub struct Router {
    dataset: Arc<Dataset>,
    settings: ReportSettings,
    output_dir: PathBuf,
    matcher: Box<dyn Matcher>,
    pacing: Duration,
}

impl Router {
    pub fn new(dataset: Arc<Dataset>, config: &AppConfig) -> Self {
        Self {
            dataset,
            settings: config.report.clone(),
            output_dir: config.output.dir.clone(),
            matcher: Box::new(KeywordMatcher::from_config(
                config.bot.language,
                &config.bot.keywords,
            )),
            pacing: Duration::from_millis(config.bot.pacing_ms),
        }
    }

    pub fn with_matcher(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Explicit command first, then keyword matching.
    pub fn resolve(&self, text: &str) -> Option<Command> {
        Command::parse_message(text).or_else(|| self.matcher.resolve(text))
    }

    /// Replies for one inbound message. Unrecognized text gets the fallback
    /// reply with the menu.
    pub fn replies(&self, text: &str) -> Vec<Reply> {
        match self.resolve(text) {
            Some(command) => {
                debug!(%command, "routing message");
                self.run(command)
            }
            None => {
                debug!(text, "no command matched");
                vec![Reply::text(report::format_fallback()).with_keyboard()]
            }
        }
    }

    /// Replies for one command.
    pub fn run(&self, command: Command) -> Vec<Reply> {
        let analyzer = Analyzer::new(&self.dataset);
        let settings = &self.settings;
        let text = match command {
            Command::Start => {
                return vec![Reply::text(report::format_welcome(&Command::menu())).with_keyboard()]
            }
            Command::AllStats => return self.all_stats(),
            Command::SaveResults => self.save(),
            Command::Preview => report::format_preview(&self.dataset, settings.preview_rows),
            Command::Info => report::format_info(&self.dataset),
            Command::AvgMass => report::format_average_mass(analyzer.mass_statistics().as_ref()),
            Command::AvgCoords => {
                report::format_average_coordinates(analyzer.mean_coordinates().as_ref())
            }
            Command::ClassStats => report::format_class_statistics(
                &analyzer.class_distribution(),
                settings.top_classes,
            ),
            Command::AdditionalStats => report::format_additional_statistics(
                &analyzer.summary(),
                analyzer.mass_statistics().as_ref(),
                analyzer.coordinate_bounds().as_ref(),
            ),
            Command::YearAnalysis => report::format_year_analysis(
                analyzer.year_analysis().as_ref(),
                settings.decade_rows,
            ),
            Command::HeavyMeteorites => report::format_heaviest(
                &analyzer.top_by_mass(settings.heavy_count),
                settings.heavy_count,
            ),
        };
        vec![Reply::text(text)]
    }

    fn save(&self) -> String {
        match save_results(&self.dataset, &self.output_dir) {
            Ok(artifacts) => report::format_saved(&artifacts),
            Err(e) => {
                warn!(error = %e, "saving results failed");
                report::format_save_failure(&e)
            }
        }
    }

    fn all_stats(&self) -> Vec<Reply> {
        const SEQUENCE: [Command; 7] = [
            Command::Preview,
            Command::AvgMass,
            Command::AvgCoords,
            Command::ClassStats,
            Command::AdditionalStats,
            Command::YearAnalysis,
            Command::HeavyMeteorites,
        ];

        let mut replies = vec![Reply::text(report::format_all_stats_intro())];
        for (i, command) in SEQUENCE.into_iter().enumerate() {
            replies.extend(
                self.run(command)
                    .into_iter()
                    .map(|reply| if i == 0 { reply } else { reply.paced() }),
            );
        }
        replies
    }

    /// Route one message and deliver every reply to `sink`, sleeping the
    /// pacing delay before each paced reply.
    pub fn handle<S: ReplySink + ?Sized>(&self, text: &str, sink: &mut S) -> Result<(), S::Error> {
        let replies = self.replies(text);
        info!(replies = replies.len(), "handled message");
        for reply in replies {
            if reply.paced && !self.pacing.is_zero() {
                std::thread::sleep(self.pacing);
            }
            sink.deliver(reply)?;
        }
        Ok(())
    }
}
