use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use stageplot_cli::{Args, Format};

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .toml pipeline files from a directory
fn collect_pipeline_files(dir: PathBuf) -> Vec<PathBuf> {
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

fn args_for(input: &Path, output: &Path, format: Option<Format>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        format,
        width: None,
        config: Some(
            demos_dir()
                .join("missing-on-purpose.toml")
                .to_string_lossy()
                .to_string(),
        ),
        log_level: "off".to_string(),
    }
}

fn args_with_default_config(input: &Path, output: &Path) -> Args {
    Args {
        config: None,
        ..args_for(input, output, None)
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_pipeline_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        for extension in ["svg", "html"] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));
            let args = args_with_default_config(demo_path, &output_path);

            match stageplot_cli::run(&args) {
                Ok(()) => {
                    let output = fs::read_to_string(&output_path).expect("Output written");
                    assert!(output.contains("<svg"), "{} has no SVG", output_path.display());
                }
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_pipeline_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join("out.svg");
        let args = args_with_default_config(demo_path, &output_path);

        assert!(
            stageplot_cli::run(&args).is_err(),
            "{} should fail",
            demo_path.display()
        );
        assert!(!output_path.exists(), "No output expected on failure");
    }
}

#[test]
fn e2e_html_uses_pipeline_name_as_title() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("plot.out");
    let args = Args {
        format: Some(Format::Html),
        ..args_with_default_config(&demos_dir().join("text_classifier.toml"), &output_path)
    };

    stageplot_cli::run(&args).expect("Demo should render");

    let page = fs::read_to_string(&output_path).unwrap();
    assert!(page.contains("<title>text-classifier</title>"));
    assert_eq!(page.matches("<template id=\"stageplot-tooltip-").count(), 4);
}

#[test]
fn e2e_width_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("wide.svg");
    let args = Args {
        width: Some(1200),
        ..args_with_default_config(&demos_dir().join("nested_pipeline.toml"), &output_path)
    };

    stageplot_cli::run(&args).expect("Demo should render");

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("viewBox=\"0 0 1200 450\""));
}

#[test]
fn e2e_missing_explicit_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");
    let args = args_for(
        &demos_dir().join("text_classifier.toml"),
        &output_path,
        Some(Format::Svg),
    );

    assert!(stageplot_cli::run(&args).is_err());
}
