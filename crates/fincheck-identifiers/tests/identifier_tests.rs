//! Check digit, validation and extraction integration tests

mod common;

use common::fixtures::load_fixture;
use fincheck_identifiers::{
    aba_check_digit, cusip_check_digit, extract, extract_all, find_securities, get_abas,
    get_cusips, get_isins, get_sedols, is_aba, is_cusip, is_isin, is_sedol, isin_check_digit,
    luhn_check_digit, sedol_check_digit, validate, Cusip, IdentifierError, IdentifierFamily,
};
use rstest::rstest;

// === Check digits ===

#[test]
fn test_cusip_check_digit_reference() {
    assert_eq!(cusip_check_digit("93114210").unwrap().value(), 3);
}

#[test]
fn test_isin_check_digit_reference() {
    assert_eq!(isin_check_digit("US023135106").unwrap().value(), 7);
}

#[test]
fn test_sedol_check_digit_reference() {
    assert_eq!(sedol_check_digit("B7TL82").unwrap().value(), 0);
}

#[rstest]
#[case("01100001", 5)]
#[case("02100002", 1)]
#[case("12200024", 7)]
#[case("32207009", 3)]
fn test_aba_check_digit(#[case] body: &str, #[case] expected: u8) {
    assert_eq!(aba_check_digit(body).unwrap().value(), expected);
}

#[test]
fn test_luhn_empty_input_fails() {
    assert!(matches!(
        luhn_check_digit(""),
        Err(IdentifierError::InvalidInput(_))
    ));
}

#[rstest]
#[case(IdentifierFamily::Cusip, "9311421")] // Too short
#[case(IdentifierFamily::Cusip, "9311421a")] // Lowercase
#[case(IdentifierFamily::Isin, "U5023135106")] // Digit in country code
#[case(IdentifierFamily::Sedol, "B7TL8")] // Too short
#[case(IdentifierFamily::Sedol, "E7TL82")] // Vowel
#[case(IdentifierFamily::Aba, "0210000X")] // Letter
fn test_check_digit_rejects_bad_format(#[case] family: IdentifierFamily, #[case] body: &str) {
    let err = fincheck_identifiers::family_check_digit(family, body).unwrap_err();
    assert!(
        matches!(err, IdentifierError::InvalidFormat { family: f, .. } if f == family),
        "unexpected error for {}: {:?}",
        body,
        err
    );
}

// === Validation ===

#[rstest]
#[case("30303M102", true)]
#[case("30303M103", false)] // Last digit altered
#[case("931142103", true)]
#[case("M0392N101", true)]
#[case("M0392N100", false)]
#[case("98986X109", true)]
#[case("12345*@#7", true)] // Private placement symbols
#[case("30303M10", false)] // Too short
fn test_is_cusip(#[case] candidate: &str, #[case] expected: bool) {
    assert_eq!(is_cusip(candidate), expected);
}

#[rstest]
#[case("US0378331005", true)]
#[case("US0231351067", true)]
#[case("DE000BAY0017", true)]
#[case("GB00B03MLX29", true)]
#[case("US0378331006", false)]
#[case("us0378331005", false)]
fn test_is_isin(#[case] candidate: &str, #[case] expected: bool) {
    assert_eq!(is_isin(candidate), expected);
}

#[rstest]
#[case("B7TL820", true)]
#[case("0263494", true)]
#[case("B0YBKJ7", true)]
#[case("B0YBKJ6", false)]
#[case("1234567", false)]
fn test_is_sedol(#[case] candidate: &str, #[case] expected: bool) {
    assert_eq!(is_sedol(candidate), expected);
}

#[rstest]
#[case("011000015", true)]
#[case("021000021", true)]
#[case("011000016", false)]
#[case("02100002", false)]
fn test_is_aba(#[case] candidate: &str, #[case] expected: bool) {
    assert_eq!(is_aba(candidate), expected);
}

#[test]
fn test_validator_requires_whole_string() {
    assert!(!is_cusip("30303M102 "));
    assert!(!is_cusip("x 30303M102"));
    assert!(matches!(
        validate(IdentifierFamily::Cusip, "30303M102 "),
        Err(IdentifierError::InvalidFormat { .. })
    ));
}

#[test]
fn test_validate_checksum_error() {
    let err = validate(IdentifierFamily::Sedol, "B7TL821").unwrap_err();
    assert_eq!(
        err,
        IdentifierError::InvalidChecksum {
            family: IdentifierFamily::Sedol,
            expected: 0,
            found: 1,
        }
    );
}

// === Extraction ===

#[test]
fn test_get_cusips_skips_bad_checksum() {
    assert_eq!(get_cusips("M0392N101 M0392N100"), vec!["M0392N101"]);
}

#[test]
fn test_get_cusips_twice_is_identical() {
    let text = load_fixture("holdings.txt");
    let first = get_cusips(&text);
    let second = get_cusips(&text);
    assert_eq!(first, second);
}

#[test]
fn test_holdings_report_cusips() {
    let text = load_fixture("holdings.txt");
    // The routing numbers are also valid all-digit CUSIPs
    assert_eq!(
        get_cusips(&text),
        vec![
            "037833100",
            "931142103",
            "30303M102",
            "M0392N101",
            "021000021",
            "011000015",
        ]
    );
}

#[test]
fn test_holdings_report_isins() {
    let text = load_fixture("holdings.txt");
    assert_eq!(
        get_isins(&text),
        vec!["US0378331005", "DE000BAY0017", "GB00B03MLX29"]
    );
}

#[test]
fn test_holdings_report_sedols() {
    let text = load_fixture("holdings.txt");
    assert_eq!(get_sedols(&text), vec!["B0YBKJ7", "0263494"]);
}

#[test]
fn test_holdings_report_abas() {
    let text = load_fixture("holdings.txt");
    assert_eq!(get_abas(&text), vec!["021000021", "011000015"]);
}

#[test]
fn test_holdings_report_find_securities() {
    let text = load_fixture("holdings.txt");
    let found = find_securities(&text, &IdentifierFamily::SECURITIES).unwrap();
    assert_eq!(found.len(), 3);
    assert_eq!(found[&IdentifierFamily::Isin].len(), 3);
    assert_eq!(found[&IdentifierFamily::Sedol].len(), 2);
}

#[test]
fn test_extract_all_positions_point_into_text() {
    let text = load_fixture("holdings.txt");
    let hits = extract_all(&text, IdentifierFamily::all());
    assert!(!hits.is_empty());
    for hit in &hits {
        let slice = &text[hit.start_index as usize..hit.end_index as usize];
        assert_eq!(slice, hit.value);
    }
    assert!(hits.windows(2).all(|w| w[0].start_index <= w[1].start_index));
}

#[test]
fn test_extract_is_lazy() {
    let text = "037833100 931142103 30303M102";
    let first = extract(text, IdentifierFamily::Cusip).next().unwrap();
    assert_eq!(first.value, "037833100");
}

// === Records ===

#[test]
fn test_cusip_to_isin_reference() {
    let isin = Cusip::parse("98986X109").unwrap().to_isin("US").unwrap();
    assert_eq!(isin, "US98986X1090");
    assert!(is_isin(&isin));
}

#[test]
fn test_cusip_record_rejects_invalid_checksum() {
    assert_eq!(
        Cusip::parse("30303M103").unwrap_err(),
        IdentifierError::InvalidCusip("30303M103".to_string())
    );
}

#[test]
fn test_extracted_cusips_build_records() {
    let text = load_fixture("holdings.txt");
    for value in get_cusips(&text) {
        let record = Cusip::parse(&value).unwrap();
        assert!(record.is_valid());
        assert!(is_isin(&record.to_isin("US").unwrap()));
    }
}
