//! Run command: the interactive tracker on stdin/stdout.

use anyhow::{Context, Result};
use chrono::Local;
use stint_core::SystemClock;
use tokio::io::BufReader;

use crate::Config;
use crate::render::Renderer;
use crate::widget::Widget;

/// Runs the tracker until `quit` or end of input.
pub fn run(config: &Config, task: Option<&str>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = runtime.block_on(async {
        let renderer = Renderer::new(config.date_format.clone(), Local);
        let mut widget = Widget::new(SystemClock, renderer, config.live_display);
        if let Some(task) = task {
            widget.preset_task(task);
        }

        let input = BufReader::new(tokio::io::stdin());
        let mut output = std::io::stdout().lock();
        widget.run(input, &mut output).await
    });

    // tokio's stdin reads on a blocking thread that may still be waiting for
    // a line after `quit`; don't wait for it.
    runtime.shutdown_background();
    result
}
