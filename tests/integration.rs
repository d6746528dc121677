use std::{
    collections::HashSet,
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use bzip2::read::BzDecoder;
use cnf_primal::{
    interrupt::StopFlag,
    io::ClauseLines,
    pipeline::{convert, Config},
    Error,
};
use tempfile::TempDir;

const DATA: &str = "tests/data";

fn fixture(name: &str) -> Vec<u8> {
    fs::read(Path::new(DATA).join(name)).unwrap()
}

/// Copies `bytes` into a fresh temp dir so the output lands there too.
fn stage(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn decompress(path: &Path) -> String {
    let mut text = String::new();
    BzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    text
}

fn convert_fixture(name: &str) -> String {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, name, &fixture(name));
    let summary = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    assert_eq!(summary.output, dir.path().join(format!("{name}.gr.bz2")));
    decompress(&summary.output)
}

/// Checks the `p td` invariants: header counts, dense ids, no self-loops.
fn check_graph(text: &str) {
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split_whitespace().collect();
    assert_eq!(&header[..2], &["p", "td"]);
    let node_count: usize = header[2].parse().unwrap();
    let edge_count: usize = header[3].parse().unwrap();

    let mut ids = HashSet::new();
    let mut edges = HashSet::new();
    for line in lines {
        let pair: Vec<usize> = line
            .split_whitespace()
            .map(|word| word.parse().unwrap())
            .collect();
        let (u, v) = (pair[0], pair[1]);
        assert_ne!(u, v);
        assert!(edges.insert((u.min(v), u.max(v))));
        ids.insert(u);
        ids.insert(v);
    }
    assert_eq!(edges.len(), edge_count);
    assert_eq!(ids, (1..=node_count).collect::<HashSet<_>>());
}

#[test]
fn all_fixtures() {
    for entry in fs::read_dir(DATA).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        check_graph(&convert_fixture(&name));
    }
}

#[test]
fn empty_formula() {
    assert_eq!(convert_fixture("empty.cnf"), "p td 0 0\n");
}

#[test]
fn triangle() {
    assert_eq!(convert_fixture("triangle.cnf"), "p td 3 3\n1 2\n1 3\n2 3\n");
}

#[test]
fn negative_clauses_add_nothing() {
    assert_eq!(convert_fixture("negative.cnf"), "p td 0 0\n");
}

#[test]
fn shared_positive_literal() {
    assert_eq!(convert_fixture("shared.cnf"), "p td 3 2\n1 2\n1 3\n");
}

#[test]
fn sparse_mixed_formula() {
    assert_eq!(
        convert_fixture("mixed.cnf"),
        "p td 6 7\n1 2\n1 3\n1 4\n1 5\n2 5\n3 4\n3 6\n"
    );
}

#[test]
fn line_without_final_zero_is_dropped() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "tail.cnf", b"p cnf 4 1\n1 2 0 3 4\n");

    let summary = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    assert_eq!(summary.clause_count, 0);
    assert_eq!(decompress(&summary.output), "p td 0 0\n");
}

#[test]
fn inner_zero_keeps_one_clause_per_line() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "inner.cnf", b"p cnf 4 1\n1 2 0 3 4 0\n");

    let summary = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    assert_eq!(summary.clause_count, 1);
    assert_eq!(
        decompress(&summary.output),
        "p td 4 6\n1 2\n1 3\n1 4\n2 3\n2 4\n3 4\n"
    );
}

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "mixed.cnf", &fixture("mixed.cnf"));

    let first = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    let first = fs::read(first.output).unwrap();
    let second = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    let second = fs::read(second.output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn compressed_inputs() {
    let plain = fixture("mixed.cnf");
    let expected = convert_fixture("mixed.cnf");
    let dir = TempDir::new().unwrap();

    let mut gz = flate2::write::GzEncoder::new(vec![], flate2::Compression::default());
    gz.write_all(&plain).unwrap();
    let gz = stage(&dir, "mixed.cnf.gz", &gz.finish().unwrap());

    let mut bz = bzip2::write::BzEncoder::new(vec![], bzip2::Compression::default());
    bz.write_all(&plain).unwrap();
    let bz = stage(&dir, "mixed.cnf.bz2", &bz.finish().unwrap());

    let mut inputs = vec![gz, bz];

    #[cfg(feature = "xz")]
    {
        let mut xz = xz2::write::XzEncoder::new(vec![], 6);
        xz.write_all(&plain).unwrap();
        inputs.push(stage(&dir, "mixed.cnf.xz", &xz.finish().unwrap()));
    }

    for input in inputs {
        let summary = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
        assert_eq!(summary.clause_count, 8);
        assert_eq!(decompress(&summary.output), expected);
    }
}

#[test]
fn unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "triangle.cnf.foo", &fixture("triangle.cnf"));

    let err = convert(&input, &Config::default(), &StopFlag::new()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref kind, .. } if kind == "foo"));
    assert!(!dir.path().join("triangle.cnf.foo.gr.bz2").exists());
}

#[test]
fn corrupt_stream() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "triangle.cnf.gz", b"definitely not gzip");

    let err = convert(&input, &Config::default(), &StopFlag::new()).unwrap_err();
    assert!(matches!(err, Error::StreamRead { .. }));
    assert!(!dir.path().join("triangle.cnf.gz.gr.bz2").exists());
}

#[test]
fn malformed_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "bad.cnf", b"1 2 0\np cnf 2 1\n");

    let err = convert(&input, &Config::default(), &StopFlag::new()).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { line: 1, .. }));
    assert!(!dir.path().join("bad.cnf.gr.bz2").exists());
}

#[test]
fn interrupted_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "triangle.cnf", &fixture("triangle.cnf"));
    let stop = StopFlag::new();
    stop.raise();

    let err = convert(&input, &Config::default(), &stop).unwrap_err();
    assert!(matches!(err, Error::Interrupted));
    assert!(!dir.path().join("triangle.cnf.gr.bz2").exists());
}

#[test]
fn output_override_and_joined_lines() {
    let dir = TempDir::new().unwrap();
    let input = stage(&dir, "split.cnf", b"p cnf 3 1\n1 2\n3 0\n");
    let output = dir.path().join("custom.gr.bz2");

    let summary = convert(&input, &Config::default(), &StopFlag::new()).unwrap();
    assert_eq!(decompress(&summary.output), "p td 0 0\n");

    let config = Config {
        clause_lines: ClauseLines::Continued,
        level: 1,
        output: Some(output.clone()),
    };
    let summary = convert(&input, &config, &StopFlag::new()).unwrap();
    assert_eq!(summary.output, output);
    assert_eq!(decompress(&output), "p td 3 3\n1 2\n1 3\n2 3\n");
}
