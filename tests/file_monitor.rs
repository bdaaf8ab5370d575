//! Integration tests watching real files on disk.

use arc_swap::ArcSwap;
use config_monitor::core::ManualClock;
use config_monitor::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A component that swaps in a freshly read configuration when told to.
struct LoggerContext {
    path: PathBuf,
    config: ArcSwap<String>,
    reloads: AtomicUsize,
}

impl LoggerContext {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            config: ArcSwap::from_pointee(fs::read_to_string(path).unwrap()),
            reloads: AtomicUsize::new(0),
        }
    }

    fn reconfigure(&self) -> std::io::Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        self.config.store(Arc::new(contents));
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

fn rewrite(path: &Path, contents: &str, time: SystemTime) {
    fs::write(path, contents).unwrap();
    set_mtime(path, time);
}

fn call_n<M: ConfigurationMonitor + ?Sized>(monitor: &M, n: usize) -> Vec<CheckOutcome> {
    (0..n)
        .map(|_| monitor.check_configuration().unwrap())
        .collect()
}

fn reload_listener(ctx: &Arc<LoggerContext>) -> std::result::Result<(), ListenerError> {
    ctx.reconfigure().map_err(ListenerError::new)
}

#[test]
fn test_change_scenario_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("log.yaml");
    let t0 = SystemTime::now() - Duration::from_secs(3600);
    rewrite(&config_path, "level: info\n", t0);

    let clock = Arc::new(ManualClock::new(1_000_000));
    let ctx = Arc::new(LoggerContext::new(&config_path));
    let monitor = ChangeMonitor::builder()
        .target(Arc::clone(&ctx))
        .source(FileSource::new(&config_path))
        .listener(reload_listener)
        .interval_secs(5)
        .clock(clock.clone())
        .build()
        .unwrap();

    // Fifteen calls never get past the counter gate.
    assert!(
        call_n(&monitor, 15)
            .iter()
            .all(|o| *o == CheckOutcome::Skipped)
    );

    // The resource changes, but the 16th call comes before the deadline.
    rewrite(&config_path, "level: debug\n", t0 + Duration::from_secs(60));
    assert_eq!(call_n(&monitor, 1)[0], CheckOutcome::NotDue);
    assert_eq!(ctx.reloads.load(Ordering::SeqCst), 0);

    // Past the deadline, the next multiple of 16 runs the check.
    clock.advance(5_000);
    let outcomes = call_n(&monitor, 16);
    assert!(outcomes[..15].iter().all(|o| *o == CheckOutcome::Skipped));
    assert_eq!(outcomes[15], CheckOutcome::Changed { notified: 1 });
    assert_eq!(ctx.reloads.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.config.load().as_str(), "level: debug\n");

    // Nothing new on disk: no further reloads.
    clock.advance(5_000);
    assert_eq!(call_n(&monitor, 16)[15], CheckOutcome::Unchanged);
    assert_eq!(ctx.reloads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_deleted_file_is_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("log.yaml");
    rewrite(
        &config_path,
        "level: info\n",
        SystemTime::now() - Duration::from_secs(60),
    );

    let clock = Arc::new(ManualClock::new(0));
    let ctx = Arc::new(LoggerContext::new(&config_path));
    let monitor = ChangeMonitor::builder()
        .target(Arc::clone(&ctx))
        .source(FileSource::new(&config_path))
        .listener(reload_listener)
        .clock(clock.clone())
        .build()
        .unwrap();
    let baseline = monitor.last_modified();
    assert!(baseline > 0);

    fs::remove_file(&config_path).unwrap();
    clock.advance(5_000);
    assert_eq!(call_n(&monitor, 16)[15], CheckOutcome::Unchanged);
    assert_eq!(monitor.last_modified(), baseline);

    // Recreating it with a newer timestamp is picked up.
    rewrite(&config_path, "level: warn\n", SystemTime::now());
    clock.advance(5_000);
    assert!(call_n(&monitor, 16)[15].is_changed());
    assert_eq!(ctx.config.load().as_str(), "level: warn\n");
}

#[test]
fn test_listener_failure_surfaces_to_caller() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("log.yaml");
    let t0 = SystemTime::now() - Duration::from_secs(60);
    rewrite(&config_path, "level: info\n", t0);

    let clock = Arc::new(ManualClock::new(0));
    let ctx = Arc::new(LoggerContext::new(&config_path));
    let monitor = ChangeMonitor::builder()
        .target(Arc::clone(&ctx))
        .source(FileSource::new(&config_path))
        .listener(|_: &Arc<LoggerContext>| -> std::result::Result<(), ListenerError> {
            Err(ListenerError::msg("invalid configuration"))
        })
        .listener(reload_listener)
        .clock(clock.clone())
        .build()
        .unwrap();

    set_mtime(&config_path, t0 + Duration::from_secs(1));
    clock.advance(5_000);
    let results: Vec<_> = (0..16).map(|_| monitor.check_for_change()).collect();

    let err = results.into_iter().last().unwrap().unwrap_err();
    assert!(matches!(err, MonitorError::Listener { index: 0, .. }));
    assert!(err.to_string().contains("invalid configuration"));
    assert_eq!(ctx.reloads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_monitor_from_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("monitor.toml");
    fs::write(&settings_path, "monitor_interval = 2\n").unwrap();
    let config_path = temp_dir.path().join("log.yaml");
    fs::write(&config_path, "level: info\n").unwrap();

    let settings = MonitorSettings::load_with_env(&settings_path, "CM_IT_SETTINGS").unwrap();
    let ctx = Arc::new(LoggerContext::new(&config_path));
    let monitor = ChangeMonitor::builder()
        .target(ctx)
        .source(FileSource::new(&config_path))
        .settings(&settings)
        .build()
        .unwrap();

    assert_eq!(settings.monitor_interval, 2);
    assert_eq!(monitor.interval(), Duration::from_secs(5));
}

#[test]
fn test_null_monitor_alongside_file_monitor() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("log.yaml");
    fs::write(&config_path, "level: info\n").unwrap();

    let monitors: Vec<Box<dyn ConfigurationMonitor>> = vec![
        Box::new(NullMonitor),
        Box::new(
            ChangeMonitor::builder()
                .target(Arc::new(LoggerContext::new(&config_path)))
                .source(FileSource::new(&config_path))
                .build()
                .unwrap(),
        ),
    ];

    for monitor in &monitors {
        assert!(call_n(monitor.as_ref(), 32).iter().all(|o| !o.is_changed()));
    }
}
