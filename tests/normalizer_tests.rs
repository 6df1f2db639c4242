use twister::kernel::speech::normalize;

#[test]
fn test_strips_punctuation_and_case() {
    assert_eq!(normalize("Six Slippery Snails, slid slowly seaward!"), "six slippery snails slid slowly seaward");
    assert_eq!(normalize("  Red lorry; YELLOW lorry.  "), "red lorry yellow lorry");
    assert_eq!(normalize("It's 4 o'clock"), "its 4 oclock");
}

#[test]
fn test_empty_and_blank_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("?!...,"), "");
}

#[test]
fn test_non_ascii_letters_are_dropped() {
    // Only a-z, 0-9 and whitespace survive.
    assert_eq!(normalize("Café crème"), "caf crme");
    assert_eq!(normalize("naïve"), "nave");
}

#[test]
fn test_idempotent() {
    let samples = [
        "",
        "Peter Piper picked a peck of pickled peppers.",
        "  How much wood would a woodchuck chuck?  ",
        "ÀÉÎ mixed — dashes – and “quotes”",
        "tabs\tand\nnewlines",
        "İstanbul KELVIN \u{212A}",
        "123 Fake St.",
        "!!!",
    ];

    for sample in samples {
        let once = normalize(sample);
        let twice = normalize(&once);
        assert_eq!(once, twice, "normalize must be idempotent for {:?}", sample);
    }
}
