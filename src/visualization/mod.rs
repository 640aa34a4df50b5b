mod charts;
mod tables;

pub use charts::{format_decade_histogram, print_decade_histogram};
pub use tables::{
    format_class_table, format_fall_table, format_heaviest_table, format_summary_table,
    print_class_table, print_fall_table, print_heaviest_table, print_summary_table,
};
