use clap::Parser;

use termexam::cli::Cli;
use termexam::loader;
use termexam::model::{ExamDef, QuestionKind};
use termexam::session::Session;
use termexam::timer::format_clock;
use termexam::tui::{self, RunConfig};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let path = std::path::Path::new(&cli.exam_file);
    let (exam, file_hash) = loader::load_exam(path).map_err(|e| e.to_string())?;

    if cli.check {
        print_summary(&exam);
        return Ok(());
    }

    let duration_minutes = cli.duration.unwrap_or(exam.duration_minutes);
    let source_file = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let session = Session::new(exam, duration_minutes * 60).map_err(|e| e.to_string())?;

    tui::run_tui(
        session,
        RunConfig {
            source_file,
            file_hash,
            report_path: cli.report,
        },
    )?;

    Ok(())
}

fn print_summary(exam: &ExamDef) {
    let mut mcq = 0;
    let mut msq = 0;
    let mut nat = 0;
    let mut total_marks = 0.0;
    for q in &exam.questions {
        match q.kind {
            QuestionKind::SingleChoice => mcq += 1,
            QuestionKind::MultiChoice => msq += 1,
            QuestionKind::Numeric => nat += 1,
        }
        total_marks += q.marks;
    }

    println!("Exam: {}", exam.title);
    println!(
        "Questions: {} ({} MCQ, {} MSQ, {} NAT)",
        exam.questions.len(),
        mcq,
        msq,
        nat
    );
    println!("Total marks: {}", total_marks);
    println!("Duration: {}", format_clock(exam.duration_seconds()));
}
