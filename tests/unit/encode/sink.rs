use super::*;

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn dir_sink_commit_publishes_only_final_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("cards");
    let mut sink = DirSink::new(&out);

    let mut handle = sink.begin("RSVP_Card_Jane_Doe.png").unwrap();
    handle.write_all(b"abc").unwrap();
    handle.write_all(b"def").unwrap();
    let saved = handle.commit().unwrap();

    assert_eq!(saved.filename, "RSVP_Card_Jane_Doe.png");
    assert_eq!(saved.len, 6);
    assert_eq!(saved.path.as_deref(), Some(out.join("RSVP_Card_Jane_Doe.png").as_path()));
    assert_eq!(dir_entries(&out), ["RSVP_Card_Jane_Doe.png"]);
    assert_eq!(std::fs::read(out.join("RSVP_Card_Jane_Doe.png")).unwrap(), b"abcdef");
}

#[test]
fn dir_sink_dropped_handle_leaves_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path());
    {
        let mut handle = sink.begin("RSVP_Card_Ada.png").unwrap();
        handle.write_all(b"partial").unwrap();
        assert_eq!(dir_entries(tmp.path()), [".RSVP_Card_Ada.png.part"]);
    }
    assert!(dir_entries(tmp.path()).is_empty());
}

#[test]
fn dir_sink_rejects_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path());
    assert!(sink.begin("../escape.png").is_err());
    assert!(sink.begin("").is_err());
}

#[test]
fn memory_sink_counts_releases() {
    let mut sink = InMemorySink::new();
    {
        let mut h = sink.begin("a.png").unwrap();
        h.write_all(&[1, 2, 3]).unwrap();
        let saved = h.commit().unwrap();
        assert_eq!(saved.len, 3);
        assert!(saved.path.is_none());
    }
    {
        let mut h = sink.begin("b.png").unwrap();
        h.write_all(&[9]).unwrap();
    }
    assert_eq!(sink.released(), 2);
    assert_eq!(sink.saved().len(), 1);
    assert_eq!(sink.saved()[0], ("a.png".to_owned(), vec![1, 2, 3]));
}
