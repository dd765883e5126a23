#![allow(non_snake_case)]
use RustedQuad::Utils::logger::init_logger;
use RustedQuad::numerical::Quadrature::quad_report::QuadratureReport;
use RustedQuad::numerical::Quadrature::quad_task::QuadratureTask;
use log::info;
use std::env;
use std::error::Error;

/// Without arguments: the lab problem, integral of (x+3)/(x^2+4) over [0, 2] with eps = 1e-4.
/// With one argument: path to a task document overriding any of the defaults.
fn main() -> Result<(), Box<dyn Error>> {
    let task = match env::args().nth(1) {
        Some(path) => QuadratureTask::from_file(&path)?,
        None => QuadratureTask::default(),
    };
    init_logger(task.loglevel.as_deref(), task.log_to_file)?;
    info!("Program started");

    let report = QuadratureReport::lab(&task)?;
    report.print();
    if let Some(path) = &task.csv_output {
        report.save_csv(path)?;
    }
    info!("Program ended");
    Ok(())
}
