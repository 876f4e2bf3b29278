use voicelog::domain::AudioFormat;

#[test]
fn given_known_suffixes_when_detecting_then_returns_fixed_table_entries() {
    let cases = [
        ("u1/visit.mp4", AudioFormat::Mp4, "audio/mp4", "mp4"),
        ("u1/visit.m4a", AudioFormat::M4a, "audio/mp4", "m4a"),
        ("u1/visit.mp3", AudioFormat::Mp3, "audio/mp3", "mp3"),
        ("u1/visit.wav", AudioFormat::Wav, "audio/wav", "wav"),
        ("u1/visit.ogg", AudioFormat::Ogg, "audio/ogg", "ogg"),
        ("u1/visit.webm", AudioFormat::Webm, "audio/webm", "webm"),
    ];

    for (path, expected, mime, extension) in cases {
        let format = AudioFormat::from_path(path);
        assert_eq!(format, expected, "path {}", path);
        assert_eq!(format.mime_type(), mime);
        assert_eq!(format.extension(), extension);
    }
}

#[test]
fn given_unknown_suffix_when_detecting_then_falls_through_to_webm() {
    assert_eq!(AudioFormat::from_path("x.unknown"), AudioFormat::Webm);
    assert_eq!(AudioFormat::from_path("x.unknown").mime_type(), "audio/webm");
}

#[test]
fn given_path_without_suffix_when_detecting_then_falls_through_to_webm() {
    assert_eq!(AudioFormat::from_path("u1/recording"), AudioFormat::Webm);
    assert_eq!(AudioFormat::from_path(""), AudioFormat::Webm);
}

#[test]
fn given_uppercase_suffix_when_detecting_then_matches_case_insensitively() {
    assert_eq!(AudioFormat::from_path("u1/VISIT.WAV"), AudioFormat::Wav);
    assert_eq!(AudioFormat::from_path("u1/visit.Mp3"), AudioFormat::Mp3);
}

#[test]
fn given_dotted_filename_when_detecting_then_uses_last_suffix_only() {
    assert_eq!(AudioFormat::from_path("u1/visit.backup.ogg"), AudioFormat::Ogg);
    assert_eq!(AudioFormat::from_path("u1/visit.wav.tmp"), AudioFormat::Webm);
}
