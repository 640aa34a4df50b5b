//! Text rendering of statistics for the console report and the chat bot.

mod format;
mod messages;

pub use format::{format_grouped, group_thousands};
pub use messages::{
    format_additional_statistics, format_all_stats_intro, format_average_coordinates,
    format_average_mass, format_class_statistics, format_fallback, format_heaviest, format_info,
    format_preview, format_save_failure, format_saved, format_welcome, format_year_analysis,
    full_report, NO_DATA,
};
