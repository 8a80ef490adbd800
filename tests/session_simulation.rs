// tests/session_simulation.rs
// Drives a session the way the UI would: switch, edit, run, clear

use fake_compiler::config::Config;
use fake_compiler::language::sample;
use fake_compiler::log::Classification;
use fake_compiler::session::{RunOutcome, Session};
use fake_compiler::Language;

fn instant_session(language: Language) -> Session {
    Session::with_memory_host(Config {
        run_delay_ms: 0,
        language,
        ..Config::default()
    })
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn test_switch_language_loads_sample_and_clears_log() {
        let mut session = instant_session(Language::Python);
        session.edit("print('unsaved')");
        session.run().expect("run failed");
        assert!(!session.state().log.is_empty());

        session.switch_language(Language::Java);

        assert_eq!(session.state().language, Language::Java);
        assert_eq!(session.state().source, sample(Language::Java));
        assert!(session.state().log.is_empty());
    }

    #[test]
    fn test_clear_always_empties() {
        let mut session = instant_session(Language::Java);
        session.clear();
        assert!(session.state().log.is_empty());

        session.run().expect("run failed");
        session.clear();
        session.clear();
        assert!(session.state().log.is_empty());
    }

    #[test]
    fn test_each_run_replaces_previous_log() {
        let mut session = instant_session(Language::Python);
        session.edit("print('first')");
        session.run().expect("run failed");
        session.edit("print('second')");
        session.run().expect("run failed");

        assert_eq!(
            session.state().log.texts_of(Classification::Success),
            vec!["second"]
        );
    }

    #[test]
    fn test_markup_run_replaces_surface() {
        let mut session = instant_session(Language::Html);

        let first = match session.run().expect("run failed") {
            Some(RunOutcome::Surface(id)) => id,
            other => panic!("expected a surface, got {:?}", other),
        };
        assert!(session.state().log.is_empty());

        session.edit("<p id=\"edited\">after</p>");
        let second = match session.run().expect("run failed") {
            Some(RunOutcome::Surface(id)) => id,
            other => panic!("expected a surface, got {:?}", other),
        };

        let host = session.passthrough().host();
        assert_ne!(first, second);
        assert_eq!(host.live_count(), 1);
        assert!(host.document(first).is_none());
        assert_eq!(host.document(second), Some("<p id=\"edited\">after</p>"));
        assert!(session.state().log.is_empty());
    }

    #[test]
    fn test_switching_away_from_markup_tears_down_surface() {
        let mut session = instant_session(Language::Html);
        session.run().expect("run failed");
        session.switch_language(Language::Python);
        assert_eq!(session.passthrough().host().live_count(), 0);
    }

    #[test]
    fn test_tab_inserts_four_spaces() {
        let mut session = instant_session(Language::Python);
        session.edit("def f():\nreturn 1");
        let cursor = session.insert_indent(9, 9);

        assert_eq!(cursor, 13);
        assert_eq!(session.state().source, "def f():\n    return 1");
        assert_eq!(session.state().cursor, 13);
    }

    #[test]
    fn test_run_waits_for_configured_delay() {
        let mut session = Session::with_memory_host(Config {
            run_delay_ms: 30,
            ..Config::default()
        });
        let started = std::time::Instant::now();
        let handle = session.request_run().expect("no run pending");
        assert!(session.state().running);
        assert!(!handle.is_cancelled());

        session.run_pending().expect("run failed");
        assert!(started.elapsed() >= std::time::Duration::from_millis(30));
        assert!(!session.state().running);
    }
}
