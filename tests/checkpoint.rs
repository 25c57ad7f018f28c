use std::fs;

use model_params::{Dims, Model, ParamsErr, ScoreVariant};

/// Encodes a checkpoint header followed by an empty parameter list.
fn header_only(score: &str, loss: &str, dims: [u64; 3]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for s in [score, loss] {
        bytes.extend_from_slice(&(s.len() as u64).to_le_bytes());
        bytes.extend_from_slice(s.as_bytes());
    }
    for n in dims.into_iter().chain([0]) {
        bytes.extend_from_slice(&n.to_le_bytes());
    }
    bytes
}

fn bits(model: &Model) -> Vec<u32> {
    model.params().iter().map(|x| x.to_bits()).collect()
}

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    for variant in [ScoreVariant::Linear, ScoreVariant::Fm, ScoreVariant::Ffm] {
        let path = dir.path().join(format!("{variant}.bin"));
        let model =
            Model::initialize_seeded(variant, "cross_entropy", Dims::new(6, 3, 5), 21).unwrap();

        model.save(&path).unwrap();
        let loaded = Model::load(&path).unwrap();

        assert_eq!(loaded.variant(), variant);
        assert_eq!(loaded.loss(), "cross_entropy");
        assert_eq!(loaded.dims(), Dims::new(6, 3, 5));
        assert_eq!(loaded.param_count(), model.param_count());
        assert_eq!(bits(&loaded), bits(&model));
        assert_eq!(loaded.params().as_ptr().addr() % loaded.layout().alignment(), 0);
    }
}

#[test]
fn trained_weights_survive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ffm.bin");

    let mut model = Model::initialize(ScoreVariant::Ffm, "squared", Dims::new(3, 2, 4)).unwrap();
    model
        .params_mut()
        .iter_mut()
        .enumerate()
        .for_each(|(i, w)| *w = i as f32 * -0.5);

    model.save(&path).unwrap();
    let loaded = Model::load(&path).unwrap();

    assert_eq!(bits(&loaded), bits(&model));
}

#[test]
fn loading_twice_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fm.bin");

    Model::initialize_seeded(ScoreVariant::Fm, "squared", Dims::new(10, 0, 8), 3)
        .unwrap()
        .save(&path)
        .unwrap();

    let first = Model::load(&path).unwrap();
    let second = Model::load(&path).unwrap();

    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn file_size_matches_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linear.bin");

    let model = Model::initialize(ScoreVariant::Linear, "squared", Dims::new(5, 0, 0)).unwrap();
    model.save(&path).unwrap();

    // two strings, three dims, the count and ten floats
    let expected = (8 + 6) + (8 + 7) + 3 * 8 + 8 + 10 * 4;
    assert_eq!(fs::metadata(&path).unwrap().len(), expected);
}

#[test]
fn missing_file_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();

    let err = Model::load(dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, ParamsErr::Io(_)));
}

#[test]
fn empty_path_is_invalid() {
    let err = Model::load("").unwrap_err();
    assert!(matches!(err, ParamsErr::InvalidArgument(_)));

    let model = Model::initialize(ScoreVariant::Linear, "squared", Dims::new(1, 0, 0)).unwrap();
    let err = model.save("").unwrap_err();
    assert!(matches!(err, ParamsErr::InvalidArgument(_)));
}

#[test]
fn unwritable_path_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let model = Model::initialize(ScoreVariant::Linear, "squared", Dims::new(1, 0, 0)).unwrap();

    let err = model.save(dir.path().join("missing").join("model.bin")).unwrap_err();
    assert!(matches!(err, ParamsErr::Io(_)));
}

#[test]
fn truncated_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ffm.bin");

    Model::initialize(ScoreVariant::Ffm, "squared", Dims::new(4, 2, 3))
        .unwrap()
        .save(&path)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    for len in [0, 5, 20, bytes.len() - 1] {
        fs::write(&path, &bytes[..len]).unwrap();

        let err = Model::load(&path).unwrap_err();
        assert!(matches!(err, ParamsErr::Corrupt(_)), "{len} bytes: {err}");
    }
}

#[test]
fn huge_dims_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.bin");

    let headers = [
        header_only("linear", "squared", [1, 0, u64::MAX]),
        header_only("fm", "squared", [1, 0, u64::MAX]),
        header_only("ffm", "squared", [1, 1, u64::MAX]),
        header_only("ffm", "squared", [u64::MAX / 2, 4, 4]),
        header_only("ffm", "squared", [u64::MAX / 4, u64::MAX / 4, 1]),
    ];

    for bytes in headers {
        fs::write(&path, bytes).unwrap();

        let err = Model::load(&path).unwrap_err();
        assert!(matches!(err, ParamsErr::Corrupt(_)), "{err}");
    }
}

#[test]
fn unusable_headers_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header.bin");

    for bytes in [
        header_only("fm", "squared", [0, 0, 4]),
        header_only("linear", "", [5, 0, 0]),
    ] {
        fs::write(&path, bytes).unwrap();

        let err = Model::load(&path).unwrap_err();
        assert!(matches!(err, ParamsErr::Corrupt(_)), "{err}");
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fm.bin");

    let model = Model::initialize(ScoreVariant::Fm, "squared", Dims::new(2, 0, 2)).unwrap();
    model.save(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(b"junk");
    fs::write(&path, bytes).unwrap();

    let loaded = Model::load(&path).unwrap();
    assert_eq!(bits(&loaded), bits(&model));
}
