//! Tests for the run module.

use std::io::Cursor;
use std::sync::Mutex;

use confsync::classify::{ClassifiedError, NoopReporter};
use confsync::transport::ConfigSnapshot;

use super::*;

/// Transport returning a fixed snapshot; imports echo or fail.
#[derive(Debug)]
struct FixedTransport {
    snapshot: Result<ConfigSnapshot, ClassifiedError>,
    reject_imports: bool,
}

impl FixedTransport {
    fn serving(original: &str, full: &str) -> Self {
        Self {
            snapshot: Ok(ConfigSnapshot::new(original, full)),
            reject_imports: false,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            snapshot: Err(ClassifiedError::new(message).with_category("http")),
            reject_imports: true,
        }
    }
}

impl ConfigTransport for FixedTransport {
    async fn get_config(&self) -> Result<ConfigSnapshot, ClassifiedError> {
        self.snapshot.clone()
    }

    async fn put_config(&self, text: &str) -> Result<ConfigSnapshot, ClassifiedError> {
        if self.reject_imports {
            return Err(ClassifiedError::new("rejected").with_category("toml"));
        }
        Ok(ConfigSnapshot::new(text, format!("{text}\nb=2")))
    }
}

#[derive(Debug, Default)]
struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _description: Option<&str>) {}
}

#[derive(Debug, Default)]
struct Captured(Mutex<Vec<String>>);

impl Captured {
    fn texts(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Clipboard for Captured {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

type TestController = ConfigController<FixedTransport, SilentNotifier, Captured, NoopReporter>;

fn test_controller(transport: FixedTransport) -> TestController {
    ConfigController::new(
        ConfigStore::new(transport),
        SilentNotifier,
        Captured::default(),
        NoopReporter,
    )
}

mod run_error {
    use super::*;

    #[test]
    fn fetch_displays_message() {
        let error = RunError::Fetch("unreachable [HTTP]".to_string());

        assert_eq!(
            error.to_string(),
            "Fetching configuration failed: unreachable [HTTP]"
        );
    }

    #[test]
    fn read_draft_displays_path() {
        let error = RunError::ReadDraft {
            path: PathBuf::from("new.toml"),
            source: std::io::Error::other("denied"),
        };

        assert!(error.to_string().contains("new.toml"));
    }

    #[test]
    fn controller_failures_are_already_notified() {
        assert!(RunError::Fetch(String::new()).already_notified());
        assert!(RunError::Copy(String::new()).already_notified());
        assert!(RunError::Import(String::new()).already_notified());
        assert!(
            !RunError::Output(ClipboardError::Write {
                target: "stdout".to_string(),
                source: std::io::Error::other("closed"),
            })
            .already_notified()
        );
    }
}

mod actions {
    use super::*;

    #[tokio::test]
    async fn show_prints_original() {
        let c = test_controller(FixedTransport::serving("a=1", "a=1\nb=2"));
        let out = Captured::default();

        show(&c, false, &out).await.unwrap();

        assert_eq!(out.texts(), vec!["a=1".to_string()]);
    }

    #[tokio::test]
    async fn show_full_prints_full() {
        let c = test_controller(FixedTransport::serving("a=1", "a=1\nb=2"));
        let out = Captured::default();

        show(&c, true, &out).await.unwrap();

        assert_eq!(out.texts(), vec!["a=1\nb=2".to_string()]);
    }

    #[tokio::test]
    async fn show_fails_when_fetch_fails() {
        let c = test_controller(FixedTransport::failing("unreachable"));
        let out = Captured::default();

        let err = show(&c, false, &out).await.unwrap_err();

        assert!(matches!(err, RunError::Fetch(ref m) if m == "unreachable [HTTP]"));
        assert!(out.texts().is_empty());
    }

    #[tokio::test]
    async fn diff_reports_defaults() {
        let differs = test_controller(FixedTransport::serving("a=1", "a=1\nb=2"));
        let same = test_controller(FixedTransport::serving("a=1", "a=1"));
        let out = Captured::default();

        diff(&differs, &out).await.unwrap();
        diff(&same, &out).await.unwrap();

        let texts = out.texts();
        assert!(texts[0].contains("differs"));
        assert!(texts[1].contains("identical"));
    }

    #[tokio::test]
    async fn copy_writes_to_controller_clipboard() {
        let c = test_controller(FixedTransport::serving("a=1", "a=1\nb=2"));

        copy(&c).await.unwrap();

        assert_eq!(c.clipboard().texts(), vec!["a=1".to_string()]);
    }

    #[tokio::test]
    async fn import_accepts_draft() {
        let c = test_controller(FixedTransport::serving("a=1", "a=1"));

        import(&c, "a=2").await.unwrap();

        assert_eq!(c.views().await.original, "a=2");
    }

    #[tokio::test]
    async fn import_rejection_is_error() {
        let c = test_controller(FixedTransport::failing("unreachable"));

        let err = import(&c, "a=2").await.unwrap_err();

        assert!(matches!(err, RunError::Import(ref m) if m == "rejected [TOML]"));
    }

    #[tokio::test]
    async fn empty_import_is_error() {
        let c = test_controller(FixedTransport::serving("a=1", "a=1"));

        let err = import(&c, "").await.unwrap_err();

        assert!(matches!(err, RunError::Import(ref m) if m.ends_with("[VALIDATION]")));
    }
}

mod drafts {
    use super::*;

    #[test]
    fn reader_is_trimmed() {
        let text = read_trimmed(Cursor::new("\n  a=1\nb=2  \n\n")).unwrap();

        assert_eq!(text, "a=1\nb=2");
    }

    #[test]
    fn file_is_read_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.toml");
        std::fs::write(&path, "a=1\n\n").unwrap();

        assert_eq!(read_draft(&path).unwrap(), "a=1");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = read_draft(&path).unwrap_err();

        assert!(matches!(err, RunError::ReadDraft { path: ref p, .. } if *p == path));
    }
}

mod describe {
    use super::*;

    #[test]
    fn describes_parsed_values() {
        assert_eq!(describe_value(ValidatorKind::Count, "42").unwrap(), "42");
        assert_eq!(
            describe_value(ValidatorKind::ByteSize, "1.5 kb").unwrap(),
            "1536 bytes"
        );
        assert_eq!(describe_value(ValidatorKind::Duration, "2m").unwrap(), "120s");
    }

    #[test]
    fn empty_value_uses_default() {
        for kind in ValidatorKind::ALL {
            assert_eq!(
                describe_value(kind, "").unwrap(),
                "empty (uses the default)"
            );
        }
    }

    #[test]
    fn malformed_value_is_rejected() {
        let err = describe_value(ValidatorKind::Count, "123abc").unwrap_err();

        assert_eq!(err.kind, ValidatorKind::Count);
        assert_eq!(err.value, "123abc");
    }
}

mod transport_setup {
    use super::*;
    use confsync::config::Cli;

    #[test]
    fn uses_config_url_and_retry_policy() {
        let cli = Cli::parse_from_iter([
            "confsync",
            "--url",
            "http://127.0.0.1:3018/api",
            "--retry-max",
            "5",
            "show",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let transport = build_transport(&config).unwrap();

        assert_eq!(transport.base_url().as_str(), "http://127.0.0.1:3018/api/");
        assert_eq!(transport.retry_policy().max_attempts, 5);
    }
}
