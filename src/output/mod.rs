pub mod formatter;

pub use formatter::{
    format_age, format_grade_report, format_results_table, format_tier, should_use_colors,
};
