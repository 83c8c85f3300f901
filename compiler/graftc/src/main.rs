//! Graft CLI
//!
//! Rewrites ESTree JSON trees with match sequences.

use std::fs;
use std::path::{Path, PathBuf};

use graftc::{init_tracing, rewrite_estree, rewrite_modules, ModuleJob, RewriteError, RewriteOptions, RewriteReport};
use serde_json::{json, Value};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => print_usage(),
        "batch" => {
            let cli = parse_options(&args[2..]);
            let [jobs] = cli.inputs.as_slice() else {
                eprintln!("Usage: graft batch <jobs.json> [options]");
                std::process::exit(1);
            };
            run_batch(Path::new(jobs), &cli);
        }
        _ => {
            let cli = parse_options(&args[1..]);
            let [tree, spec] = cli.inputs.as_slice() else {
                eprintln!("Usage: graft <tree.json> <spec.json> [options]");
                std::process::exit(1);
            };
            run_single(Path::new(tree), Path::new(spec), &cli);
        }
    }
}

struct CliOptions {
    inputs: Vec<String>,
    output: Option<PathBuf>,
    rewrite: RewriteOptions,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut cli = CliOptions {
        inputs: Vec::new(),
        output: None,
        rewrite: RewriteOptions::default(),
    };

    // -o takes the next argument
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "-o" && i + 1 < args.len() {
            cli.output = Some(PathBuf::from(&args[i + 1]));
            i += 2;
            continue;
        }
        if arg == "--no-scopes" {
            cli.rewrite.bind_scopes = false;
        } else if arg == "--no-prune" {
            cli.rewrite.prune = false;
        } else if let Some(name) = arg.strip_prefix("--host-global=") {
            cli.rewrite.scope.host_globals.push(name.to_string());
        } else if arg.starts_with('-') {
            eprintln!("warning: ignoring unknown option `{arg}`");
        } else {
            cli.inputs.push(arg.to_string());
        }
        i += 1;
    }
    cli
}

fn run_single(tree: &Path, spec: &Path, cli: &CliOptions) {
    let result = read_json(tree).and_then(|tree| {
        let spec = read_json(spec)?;
        rewrite_estree(&tree, &spec, &cli.rewrite)
    });
    let (output, report) = result.unwrap_or_else(|e| fail(&e));

    print_report(&report);
    emit(&output, cli.output.as_deref());
}

fn run_batch(jobs: &Path, cli: &CliOptions) {
    let jobs: Vec<ModuleJob> = read_json(jobs)
        .and_then(|value| Ok(serde_json::from_value(value)?))
        .unwrap_or_else(|e| fail(&e));

    let mut failed = 0usize;
    let outputs: Vec<Value> = rewrite_modules(&jobs, &cli.rewrite)
        .into_iter()
        .map(|module| match module.result {
            Ok((tree, report)) => {
                eprintln!("{}:", module.name);
                print_report(&report);
                json!({ "name": module.name, "tree": tree, "report": report })
            }
            Err(e) => {
                failed += 1;
                eprintln!("error: {}: {e}", module.name);
                json!({ "name": module.name, "error": e.to_string() })
            }
        })
        .collect();

    emit(&Value::Array(outputs), cli.output.as_deref());
    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_report(report: &RewriteReport) {
    for fired in &report.completed {
        eprintln!("  fired {} ({} nodes captured)", fired.name, fired.captured.len());
    }
    for name in &report.unfinished {
        eprintln!("  unfinished {name}");
    }
}

fn read_json(path: &Path) -> Result<Value, RewriteError> {
    let text = fs::read_to_string(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn emit(value: &Value, output: Option<&Path>) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(&e.into()));
    match output {
        Some(path) => {
            if let Err(source) = fs::write(path, text + "\n") {
                fail(&RewriteError::Write {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
        None => println!("{text}"),
    }
}

fn fail(error: &RewriteError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

fn print_usage() {
    println!("Graft - ESTree rewriting with depth-anchored patterns");
    println!();
    println!("Usage: graft <tree.json> <spec.json> [options]");
    println!("       graft batch <jobs.json> [options]");
    println!();
    println!("A spec file holds one sequence object or an array of them.");
    println!("A jobs file is an array of {{\"name\", \"tree\", \"specs\"}} objects.");
    println!();
    println!("Options:");
    println!("  -o <path>              Write the result to <path> instead of stdout");
    println!("  --no-scopes            Skip scope binding (renames become no-ops)");
    println!("  --no-prune             Walk the whole tree even below every case");
    println!("  --host-global=<name>   Treat <name> like `window` (repeatable)");
    println!();
    println!("Logging: GRAFT_LOG=<filter> (or RUST_LOG); GRAFT_LOG_TREE=1 for tree output");
}
