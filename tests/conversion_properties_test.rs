use csv_json_service::{preview, to_json, ConvertError, CsvConverter};

/// Inputs paired with their number of data rows.
const VALID_INPUTS: &[(&str, usize)] = &[
    ("a,b\n1,2\n3,4\n", 2),
    ("a,b\n", 0),
    ("a,b\n1,2", 1),
    ("id,name,note\n1,Ada,\"likes, commas\"\n2,Linus,\"multi\nline\"\n3,Grace,\n", 3),
    ("x\n1\n\n2\n\n", 2),
    ("first,second,third\n1\n2,2\n3,3,3\n", 3),
    ("h\r\n\"quoted \"\"value\"\"\"\r\n", 1),
];

fn header_of(input: &str) -> Vec<String> {
    input
        .lines()
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim_end_matches('\r').to_string())
        .collect()
}

#[test]
fn test_record_count_matches_data_rows() {
    let converter = CsvConverter::new();
    for (input, rows) in VALID_INPUTS {
        let dataset = converter.parse(input).unwrap();
        assert_eq!(dataset.len(), *rows, "input: {:?}", input);
    }
}

#[test]
fn test_json_objects_carry_header_keys() {
    let converter = CsvConverter::new();
    for (input, _) in VALID_INPUTS {
        let dataset = converter.parse(input).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&dataset).unwrap()).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), dataset.len());

        let mut expected = header_of(input);
        expected.sort();
        for object in array {
            let mut keys: Vec<String> = object.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            assert_eq!(keys, expected, "input: {:?}", input);
        }
    }
}

#[test]
fn test_key_order_follows_header() {
    let dataset = CsvConverter::new().parse("z,a,m\n1,2,3\n").unwrap();
    assert_eq!(to_json(&dataset).unwrap(), r#"[{"z":"1","a":"2","m":"3"}]"#);
}

#[test]
fn test_conversion_is_deterministic() {
    let converter = CsvConverter::new();
    for (input, _) in VALID_INPUTS {
        let first = to_json(&converter.parse(input).unwrap()).unwrap();
        let second = to_json(&converter.parse(input).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_preview_is_prefix() {
    let dataset = CsvConverter::new()
        .parse("n\n1\n2\n3\n4\n5\n")
        .unwrap();
    let original = dataset.clone();

    for n in [0, 1, 3, 5, 10] {
        let head = preview(&dataset, n);
        assert_eq!(head.len(), n.min(dataset.len()));
        assert_eq!(head.records(), &dataset.records()[..head.len()]);
    }
    assert_eq!(dataset, original);
}

#[test]
fn test_documented_examples() {
    let converter = CsvConverter::new();

    let dataset = converter.parse("a,b\n1,2\n3,4\n").unwrap();
    assert_eq!(
        to_json(&dataset).unwrap(),
        r#"[{"a":"1","b":"2"},{"a":"3","b":"4"}]"#
    );

    let dataset = converter.parse("a,b\n").unwrap();
    assert_eq!(to_json(&dataset).unwrap(), "[]");

    let err = converter.parse("a,b\n\"unterminated\n").unwrap_err();
    assert!(matches!(err, ConvertError::ParseError { .. }));
}

#[test]
fn test_row_length_policy() {
    let converter = CsvConverter::new();

    let padded = converter.parse("a,b,c\n1\n").unwrap();
    assert_eq!(
        to_json(&padded).unwrap(),
        r#"[{"a":"1","b":null,"c":null}]"#
    );

    let err = converter.parse("a\n1,2\n").unwrap_err();
    assert!(matches!(
        err,
        ConvertError::RowLengthError {
            line: 2,
            expected: 1,
            found: 2
        }
    ));
}
