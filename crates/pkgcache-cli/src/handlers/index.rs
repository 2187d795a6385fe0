use crate::context::ExecutionContext;
use crate::presentation::renderers::PackageView;
use crate::presentation::view_models::{CommandResultViewModel, RefreshEvent};
use anyhow::Result;
use pkgcache_runtime::{RefreshKind, RefreshProgress, RefreshService};

pub fn refresh(ctx: &ExecutionContext, kind: RefreshKind, view: &dyn PackageView) -> Result<()> {
    let config = ctx.config()?;
    let db = ctx.db()?;

    let service = RefreshService::new(db, &config.tool, &ctx.paths().raw_output);
    let mut sink = ProgressSink::new(view);
    let report = service.run(kind, |progress| sink.handle(progress))?;
    sink.finish()?;

    view.render_refresh_report(&report)
}

/// Forwards refresh progress to the view and keeps the first render error.
///
/// The refresh itself runs to completion; later events are not rendered once
/// one has failed.
struct ProgressSink<'a> {
    view: &'a dyn PackageView,
    error: Option<anyhow::Error>,
}

impl<'a> ProgressSink<'a> {
    fn new(view: &'a dyn PackageView) -> Self {
        Self { view, error: None }
    }

    fn handle(&mut self, progress: RefreshProgress) {
        if self.error.is_some() {
            return;
        }
        if let Some(event) = map_progress_to_view_model(progress)
            && let Err(err) = self.view.render_refresh_event(event)
        {
            self.error = Some(err);
        }
    }

    fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn vacuum(ctx: &ExecutionContext, view: &dyn PackageView) -> Result<()> {
    let db = ctx.db()?;
    db.vacuum()?;

    view.render_command_result(&CommandResultViewModel::ok(format!(
        "Database vacuumed: {}",
        ctx.paths().db.display()
    )))
}

fn map_progress_to_view_model(progress: RefreshProgress) -> Option<RefreshEvent> {
    match progress {
        RefreshProgress::ToolStarted { program, timeout } => Some(RefreshEvent::ToolStarted {
            program,
            timeout_secs: timeout.as_secs(),
        }),
        RefreshProgress::ToolFinished { .. } => None,
        RefreshProgress::RawCaptured { path } => Some(RefreshEvent::RawCaptured { path }),
        RefreshProgress::Parsed { records } => Some(RefreshEvent::Parsed { records }),
        RefreshProgress::Stored { done, total } => Some(RefreshEvent::Stored { done, total }),
        RefreshProgress::Completed { stored, skipped } => {
            Some(RefreshEvent::Completed { stored, skipped })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::InitViewModel;
    use pkgcache_runtime::RefreshReport;
    use pkgcache_types::{PackagePage, StoredPackage};
    use std::cell::Cell;
    use std::time::Duration;

    /// View whose progress output fails on every write.
    #[derive(Default)]
    struct BrokenProgressView {
        attempts: Cell<usize>,
    }

    impl PackageView for BrokenProgressView {
        fn render_refresh_event(&self, _event: RefreshEvent) -> Result<()> {
            self.attempts.set(self.attempts.get() + 1);
            anyhow::bail!("stdout closed")
        }
        fn render_refresh_report(&self, _report: &RefreshReport) -> Result<()> {
            Ok(())
        }
        fn render_package_page(&self, _page: &PackagePage) -> Result<()> {
            Ok(())
        }
        fn render_package(&self, _package: &StoredPackage) -> Result<()> {
            Ok(())
        }
        fn render_init(&self, _result: &InitViewModel) -> Result<()> {
            Ok(())
        }
        fn render_command_result(&self, _result: &CommandResultViewModel) -> Result<()> {
            Ok(())
        }
        fn render_error(&self, _error: &anyhow::Error) {}
    }

    #[test]
    fn test_progress_render_error_is_returned() {
        let view = BrokenProgressView::default();
        let mut sink = ProgressSink::new(&view);

        sink.handle(RefreshProgress::Parsed { records: 3 });
        sink.handle(RefreshProgress::Stored { done: 3, total: 3 });

        assert_eq!(view.attempts.get(), 1);
        let err = sink.finish().unwrap_err();
        assert_eq!(err.to_string(), "stdout closed");
    }

    #[test]
    fn test_hidden_events_never_reach_the_view() {
        let view = BrokenProgressView::default();
        let mut sink = ProgressSink::new(&view);

        sink.handle(RefreshProgress::ToolFinished { bytes: 10 });

        assert_eq!(view.attempts.get(), 0);
        assert!(sink.finish().is_ok());
    }

    #[test]
    fn test_tool_finished_is_not_shown() {
        assert_eq!(
            map_progress_to_view_model(RefreshProgress::ToolFinished { bytes: 10 }),
            None
        );
    }

    #[test]
    fn test_tool_started_reports_whole_seconds() {
        let event = map_progress_to_view_model(RefreshProgress::ToolStarted {
            program: "winget".to_string(),
            timeout: Duration::from_secs(600),
        });
        assert_eq!(
            event,
            Some(RefreshEvent::ToolStarted {
                program: "winget".to_string(),
                timeout_secs: 600
            })
        );
    }
}
