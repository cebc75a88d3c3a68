use lweight::{Assignment, ErrorKind, NetworkDefinition, Posterior};

use rand::rngs::StdRng;
use rand::SeedableRng;

use std::io::Write;

/// Two coins; `both` is true exactly when both come up heads.
const COINS: &str = r#"{
    "nodes": [
        { "name": "a",
          "table": [ { "assignment": { "a": true },  "probability": 0.5 },
                     { "assignment": { "a": false }, "probability": 0.5 } ] },
        { "name": "b",
          "table": [ { "assignment": { "b": true },  "probability": 0.5 },
                     { "assignment": { "b": false }, "probability": 0.5 } ] },
        { "name": "both",
          "parents": [ "a", "b" ],
          "table": [ { "assignment": { "a": true,  "b": true,  "both": true },  "probability": 1.0 },
                     { "assignment": { "a": true,  "b": true,  "both": false }, "probability": 0.0 },
                     { "assignment": { "a": true,  "b": false, "both": true },  "probability": 0.0 },
                     { "assignment": { "a": true,  "b": false, "both": false }, "probability": 1.0 },
                     { "assignment": { "a": false, "b": true,  "both": true },  "probability": 0.0 },
                     { "assignment": { "a": false, "b": true,  "both": false }, "probability": 1.0 },
                     { "assignment": { "a": false, "b": false, "both": true },  "probability": 0.0 },
                     { "assignment": { "a": false, "b": false, "both": false }, "probability": 1.0 } ] }
    ]
}"#;

#[test]
fn query_network_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(COINS.as_bytes()).unwrap();

    let model = NetworkDefinition::from_path(file.path()).unwrap().build().unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    // both = true forces a = true
    let evidence = Assignment::new().with("both", true);
    let p = model.likelihood_weight_with_rng("a", &evidence, 200, &mut rng).unwrap();
    assert_eq!(Posterior { p_true: 1.0, p_false: 0.0 }, p);

    // P(a | both = false) = 1/3
    let evidence = Assignment::new().with("both", false);
    let p = model.likelihood_weight_with_rng("a", &evidence, 20000, &mut rng).unwrap();
    assert!((p.p_true - 1.0 / 3.0).abs() < 0.03, "{}", p);
    assert!((p.p_true + p.p_false - 1.0).abs() < 1e-9);
}

#[test]
fn invalid_definition_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(COINS.replace("\"probability\": 1.0 }", "\"probability\": 0.7 }").as_bytes()).unwrap();

    let err = NetworkDefinition::from_path(file.path()).unwrap().build().unwrap_err();
    assert_eq!(ErrorKind::Configuration, err.kind());
}
