use pretty_assertions::assert_eq;
use reciflow_cli::display::TerminalPrompt;
use reciflow_cli::speech::StdinTranscriptSource;
use reciflow_cli::store::SqliteCorpusStore;
use reciflow_core::{RecitationSession, RunOutcome, SessionConfig};
use rusqlite::{params, Connection};
use std::io::Cursor;
use std::path::Path;

const ASR: [(u32, u32, &str); 3] = [
    (103, 1, "وَالْعَصْرِ"),
    (103, 2, "إِنَّ الْإِنسَانَ لَفِي خُسْرٍ"),
    (
        103,
        3,
        "إِلَّا الَّذِينَ آمَنُوا وَعَمِلُوا الصَّالِحَاتِ وَتَوَاصَوْا بِالْحَقِّ وَتَوَاصَوْا بِالصَّبْرِ",
    ),
];

fn write_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE verses (Chapter INTEGER, Verse INTEGER, Text TEXT);")
        .unwrap();
    for (chapter, verse, text) in ASR {
        conn.execute(
            "INSERT INTO verses (Chapter, Verse, Text) VALUES (?1, ?2, ?3)",
            params![chapter, verse, text],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO verses (Chapter, Verse, Text) VALUES (?1, ?2, ?3)",
        params![108, 1, "إِنَّا أَعْطَيْنَاكَ الْكَوْثَرَ"],
    )
    .unwrap();
}

#[test]
fn recites_a_chapter_from_transcript_lines() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("verses.db");
    write_db(&db);

    let corpus = SqliteCorpusStore::open(&db).unwrap().load_corpus().unwrap();
    assert_eq!(corpus.len(), 4);

    let config = SessionConfig {
        repetition_cap: 1,
        ..SessionConfig::default()
    };
    let mut session = RecitationSession::new(&corpus, config).unwrap();

    let transcript = "والعصر\n\
                      UV ERROR\n\
                      ان الانسان لفي خسر\n\
                      الا الذين امنوا وعملوا الصالحات وتواصوا بالحق وتواصوا بالصبر\n";
    let speech = StdinTranscriptSource::spawn(Cursor::new(transcript.to_string()));
    let mut display = TerminalPrompt::new(Vec::new());

    let outcome = session.run(speech, &mut display);
    assert_eq!(outcome, RunOutcome::CycleComplete);

    let report = session.report();
    assert_eq!(report.passages_confirmed, 3);
    assert_eq!(report.repetitions_completed, 1);
    assert_eq!(report.mismatches, 0);
    assert!(report.finished_at.is_some());

    let out = String::from_utf8(display.into_inner()).unwrap();
    assert!(out.contains("== Chapter 103 =="));
    assert!(out.contains(">> 103, 2:"));
    assert!(out.contains(">> 103, 3:"));
    assert!(!out.contains("Chapter 108"));
}

#[test]
fn stops_when_transcript_ends() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("verses.db");
    write_db(&db);

    let corpus = SqliteCorpusStore::open(&db).unwrap().load_corpus().unwrap();
    let mut session = RecitationSession::new(&corpus, SessionConfig::default()).unwrap();

    let speech = StdinTranscriptSource::spawn(Cursor::new("والعصر\n".to_string()));
    let mut display = TerminalPrompt::new(Vec::new());

    assert_eq!(session.run(speech, &mut display), RunOutcome::InputExhausted);
    assert_eq!(session.report().passages_confirmed, 1);
    assert_eq!(session.report().timeouts, 1);
}
