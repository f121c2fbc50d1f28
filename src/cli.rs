use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "termexam", version, about = "Terminal-based timed mock exam simulator")]
pub struct Cli {
    /// Path to the exam definition JSON file
    pub exam_file: String,

    /// Override the exam duration in minutes
    #[arg(long, value_name = "minutes")]
    pub duration: Option<u64>,

    /// Write the graded report to this file when the exam ends
    #[arg(long, value_name = "path")]
    pub report: Option<String>,

    /// Validate the exam file and print a summary without starting
    #[arg(long)]
    pub check: bool,
}
