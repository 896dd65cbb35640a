use std::{fs, path::PathBuf};

use tempfile::tempdir;

use wirebeam_cli::{Args, run};

/// Demo scenes live at the workspace root, not in the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .toml files from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &PathBuf, output: PathBuf, config: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_scene_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No demo scenes found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, output_path.clone(), None)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Output file was written");
                assert!(svg.contains("<svg"), "{} produced no SVG", demo_path.display());
                assert!(svg.contains("<animate"), "{} has no animated beam", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemo scenes that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} demo scenes passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_scene_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error scenes found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, output_path.clone(), None)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "Failed runs must not write output");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error scenes failed as expected", error_demos.len());
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_dir().join("workflow.toml");
    let config = demos_dir().join("config").join("dark.toml");
    let output_path = temp_dir.path().join("workflow_dark.svg");

    run(&args_for(&demo, output_path.clone(), Some(config))).expect("Dark config renders");

    let svg = fs::read_to_string(&output_path).expect("Output file was written");
    assert!(svg.contains("<rect"), "Background color should add a rect");
    assert!(svg.contains(r#"dur="4s""#), "Configured duration should apply");
    assert!(svg.contains(r#"dur="2s""#), "Per-beam duration should win over config");
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope.toml");

    let err = run(&args_for(&missing, temp_dir.path().join("out.svg"), None)).unwrap_err();
    assert!(matches!(err, wirebeam::WirebeamError::Io(_)));
}
