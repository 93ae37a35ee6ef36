use std::env;
use std::path::Path;
use std::sync::Arc;

use strcalc::config::runtime::{LogLevel, LoggingPreferences};
use strcalc::{calculator, input, logging, tokenizer};

#[derive(Debug, Default)]
struct CliOptions {
    from_file: bool,
    structured: bool,
    verbose: bool,
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <expression|file> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    // Logging preferences must be pinned before the global logger starts
    logging::config::init_runtime_preferences(build_logging_preferences(&options))?;
    logging::init_global_logging()?;

    let expression = if options.from_file {
        match input::read_expression_file(Path::new(&args[1])) {
            Ok(expression_input) => expression_input.text,
            Err(error) => {
                eprintln!("FAILED: {}", error);
                print_recommended_action(error.error_code());
                std::process::exit(1);
            }
        }
    } else {
        decode_newline_escapes(&args[1])
    };

    let expression_tokenizer = Arc::new(tokenizer::create_tokenizer());
    let observer = Arc::new(calculator::LoggingAddObserver);
    let mut string_calculator =
        calculator::StringCalculator::with_observer(expression_tokenizer, observer);

    let result =
        logging::with_expression_context(&expression, || string_calculator.add(&expression));

    match result {
        Ok(sum) => {
            println!("{}", sum);
            Ok(())
        }
        Err(error) => {
            eprintln!("FAILED: {}", error);
            print_recommended_action(error.error_code());
            std::process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    println!("strcalc v{}", env!("CARGO_PKG_VERSION"));
    println!("String calculator with declarable delimiters");
    println!();
    println!("USAGE:");
    println!("    {} <expression>          # Sum an inline expression", program_name);
    println!("    {} <file> --file         # Sum an expression read from a file", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <expression>   Numbers separated by delimiters; \\n stands for a newline");
    println!("    <file>         Path to a file holding the expression verbatim");
    println!();
    println!("OPTIONS:");
    println!("    --help         Show this help message");
    println!("    --file         Treat the argument as a file path");
    println!("    --json         Emit structured JSON log events");
    println!("    --verbose      Log at debug level");
    println!("    --quiet        Log errors only");
    println!();
    println!("EXPRESSIONS:");
    println!("    1,2,3                    # Default delimiters: comma and newline");
    println!("    //;\\n1;2                 # Declare ';' as a delimiter");
    println!("    //[***]\\n1***2***3       # Declare a multi-character delimiter");
    println!("    //[*][%%]\\n1*2%%3        # Declare multiple delimiters");
    println!();
    println!("Numbers over 1000 are ignored; negative numbers are rejected.");
    println!();
    println!("BUILD:");
    println!("    Profile: {}", strcalc::config::build_info::profile());
    println!("    Constants: {}", strcalc::config::build_info::source_info());
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--file" => options.from_file = true,
            "--json" => options.structured = true,
            "--verbose" => options.verbose = true,
            "--quiet" => options.quiet = true,
            _ => {
                eprintln!("Warning: Unknown option '{}'", arg);
            }
        }
    }

    options
}

fn build_logging_preferences(options: &CliOptions) -> LoggingPreferences {
    let mut preferences = LoggingPreferences::default();

    if options.verbose {
        preferences.min_log_level = LogLevel::Debug;
    }
    if options.quiet {
        preferences.min_log_level = LogLevel::Error;
    }
    if options.structured {
        preferences.use_structured_logging = true;
    }

    preferences
}

/// Shells make it awkward to pass literal newlines, so inline expressions may
/// spell them as the two characters `\n`.
fn decode_newline_escapes(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn print_recommended_action(code: logging::Code) {
    let action = logging::codes::get_action(code.as_str());
    if action != "No specific action available" {
        eprintln!("  [{}] {}", code.as_str(), action);
    }
}
