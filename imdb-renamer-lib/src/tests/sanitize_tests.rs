use super::*;

fn sanitizer() -> NameSanitizer {
    NameSanitizer::with_words_and_year(&Settings::default().extraneous_words, 2026)
}

#[test]
fn test_release_folder() {
    let s = sanitizer();
    assert_eq!(
        s.sanitize("The.Dark.Knight.2008.1080p.BluRay.x264-[YTS.MX]"),
        "The Dark Knight 2008"
    );
}

#[test]
fn test_underscores_and_parentheses() {
    let s = sanitizer();
    assert_eq!(s.sanitize("Movie_Name_(2023)_720p_WEBRip"), "Movie Name 2023");
    assert_eq!(s.sanitize("Movie Name (2023)"), "Movie Name 2023");
}

#[test]
fn test_extraneous_words_case_insensitive() {
    let s = sanitizer();
    assert_eq!(s.sanitize("Inception bluray HEVC aac"), "Inception");
    assert_eq!(s.sanitize("Inception H.264 hdrip"), "Inception");
    assert_eq!(s.sanitize("inception web-dl"), "inception");
}

#[test]
fn test_output_has_no_configured_words() {
    let s = sanitizer();
    let words = Settings::default().extraneous_words;
    for raw in [
        "Some.Film.COMPLETE.BRrip.sujaidr",
        "Another-Film-pimprg-YTS-MX-x265",
        "Third_Film_H.265_DVDrip_WebDL",
    ] {
        let out = s.sanitize(raw);
        let tokens: Vec<String> = out.split(' ').map(str::to_lowercase).collect();
        for word in &words {
            let word_tokens: Vec<String> = normalize_separators(word)
                .split(' ')
                .map(str::to_lowercase)
                .collect();
            let found = tokens
                .windows(word_tokens.len())
                .any(|w| w == word_tokens.as_slice());
            assert!(!found, "{word:?} survived in {out:?}");
        }
    }
}

#[test]
fn test_no_separators_survive() {
    let s = sanitizer();
    for raw in ["A.B_C-D  E", "  Spaced   Out  ", "Dots...Everywhere__", "(Paren)[Tag]{Group}"] {
        let out = s.sanitize(raw);
        assert!(!out.contains(['.', '_', '-', '(', ')', '[', ']']), "{out:?}");
        assert!(!out.contains("  "), "{out:?}");
        assert_eq!(out, out.trim());
    }
}

#[test]
fn test_idempotent() {
    let s = sanitizer();
    for raw in [
        "The.Dark.Knight.2008.1080p.BluRay.x264-[YTS.MX]",
        "2001.A.Space.Odyssey.1968.REMASTERED.720p",
        "Blade.Runner.2049.2017.2160p",
        "Movie.Name.x264.x264.WEB.DL",
        "plain title",
        "",
        "YTS",
    ] {
        let once = s.sanitize(raw);
        assert_eq!(s.sanitize(&once), once, "raw: {raw:?}");
    }
}

#[test]
fn test_leading_number_title_keeps_release_year() {
    let s = sanitizer();
    assert_eq!(
        s.sanitize("2001.A.Space.Odyssey.1968.720p"),
        "2001 A Space Odyssey 1968"
    );
}

#[test]
fn test_future_year_is_part_of_title() {
    let s = sanitizer();
    assert_eq!(s.sanitize("Blade.Runner.2049.2017.2160p"), "Blade Runner 2049 2017");
}

#[test]
fn test_unmatched_name_returns_trimmed() {
    let s = sanitizer();
    assert_eq!(s.sanitize("  Amelie  "), "Amelie");
}

#[test]
fn test_extract_year() {
    let s = sanitizer();
    assert_eq!(s.extract_year("The.Matrix.1999.1080p"), Some(1999));
    assert_eq!(s.extract_year("Blade.Runner.2049.2017"), Some(2017));
    assert_eq!(s.extract_year("No Year Here"), None);
    assert_eq!(s.extract_year("Movie.1850"), None);
}

#[test]
fn test_query_ladder() {
    let s = sanitizer();
    assert_eq!(
        s.query_ladder("Breaking Bad Season 2 2009"),
        vec!["Breaking Bad Season 2 2009", "Breaking Bad Season 2", "Breaking Bad"]
    );
    assert_eq!(s.query_ladder("Heat 1995"), vec!["Heat 1995", "Heat"]);
    assert_eq!(s.query_ladder("Heat"), vec!["Heat"]);
    assert!(s.query_ladder("").is_empty());
}

#[test]
fn test_core_title_strips_episode_markers() {
    assert_eq!(core_title("Show S01E02"), "Show");
    assert_eq!(core_title("Show Episode 4"), "Show");
}

#[test]
fn test_already_properly_named() {
    assert!(already_properly_named("Movie Name (2023) - IMDb- 7.5"));
    assert!(already_properly_named("Movie Name (1999) - IMDb: 8"));
    assert!(already_properly_named("Movie Name (2023) - IMDb- N-A"));
    assert!(already_properly_named("Home Video (N-A) - IMDb- N-A"));
    assert!(!already_properly_named("Movie Name (N-A)"));
    assert!(!already_properly_named("Movie.Name.2023.1080p"));
}

#[test]
fn test_safe_name() {
    assert_eq!(safe_name("Face/Off (1997) - IMDb- 7.3"), "Face-Off (1997) - IMDb- 7.3");
    assert_eq!(safe_name("What? Why: Now*"), "What- Why- Now-");
}
