use crate::context::AppContext;
use feedwatch_core::{CancellationFlag, CycleReport, Result};
use feedwatch_monitor::Scheduler;
use std::sync::Arc;

pub async fn execute(ctx: AppContext, once: bool) -> Result<()> {
    let monitor = Arc::new(ctx.monitor()?);
    let scheduler = Scheduler::new(
        Arc::new(ctx.registry()),
        monitor,
        ctx.settings.check_interval,
    );

    let cancel = CancellationFlag::new();
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping after the current channel");
            flag.cancel();
        }
    });

    if once {
        let report = scheduler.run_once(&cancel).await?;
        print_report(&report);
    } else {
        scheduler.run(&cancel).await;
    }
    Ok(())
}

fn print_report(report: &CycleReport) {
    let width = report
        .sources
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);

    for source in &report.sources {
        println!("{:<width$}  {}", source.name, source.outcome);
    }
    if report.cancelled {
        println!("(cancelled before every channel was checked)");
    }
}
