use spel_lexer::config::runtime::RuntimeConfig;
use spel_lexer::lexical::{self, LexerError, LexicalMetrics};
use spel_lexer::utils::SourceMap;
use spel_lexer::{log_info, logging, source, Token};
use std::env;

enum Input {
    Expression(String),
    File(String),
}

struct Options {
    raw: bool,
    json: bool,
    metrics: bool,
    input: Input,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("spel-lex");

    if args.len() < 2 {
        eprintln!("Usage: {} [--raw] [--json] [--metrics] <expression>", program);
        eprintln!("       {} [--raw] [--json] [--metrics] --file <path>", program);
        eprintln!("       {} --help", program);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(program);
        return Ok(());
    }

    let options = match parse_options(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Run '{} --help' for usage", program);
            std::process::exit(2);
        }
    };

    let config = RuntimeConfig::from_env();
    if config.logging.enable_console_logging {
        logging::config::init_runtime_preferences(config.logging.clone())?;
        logging::init_global_logging()?;
    }

    let text = match &options.input {
        Input::Expression(expression) => expression.clone(),
        Input::File(path) => source::load_expression_file(path)?,
    };

    let mut items = lexical::create_tokenizer_with_preferences(&text, config.lexical).tokenize_raw();
    let mut tokens = Vec::new();
    for item in items.by_ref() {
        match item {
            Ok(token) if options.raw || !token.is_hidden() => tokens.push(token),
            Ok(_) => {}
            Err(error) => {
                report_lexer_error(&text, &error);
                std::process::exit(1);
            }
        }
    }
    let metrics = items.metrics().clone();
    log_info!("Expression tokenized",
        "tokens" => metrics.total_tokens,
        "source_bytes" => text.len()
    );

    if options.json {
        print_json(&tokens, options.metrics.then_some(&metrics))?;
    } else {
        print_table(&tokens);
        if options.metrics {
            print_metrics(&metrics);
        }
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut raw = false;
    let mut json = false;
    let mut metrics = false;
    let mut input = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--raw" => raw = true,
            "--json" => json = true,
            "--metrics" => metrics = true,
            "--file" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "--file requires a path".to_string())?;
                input = Some(Input::File(path.clone()));
            }
            "--" => {
                i += 1;
                if let Some(expression) = args.get(i) {
                    input = Some(Input::Expression(expression.clone()));
                }
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            expression => input = Some(Input::Expression(expression.to_string())),
        }
        i += 1;
    }

    let input = input.ok_or_else(|| "no expression or --file given".to_string())?;
    Ok(Options {
        raw,
        json,
        metrics,
        input,
    })
}

fn print_help(program_name: &str) {
    println!("SpEL Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Longest-match tokenizer for Spring-style expression text");
    println!();
    println!("USAGE:");
    println!("    {} [options] <expression>", program_name);
    println!("    {} [options] --file <path>", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help          Show this help message");
    println!("    --raw           Include whitespace tokens");
    println!("    --json          Print tokens as JSON");
    println!("    --metrics       Print token statistics");
    println!("    --file <path>   Read the expression from a UTF-8 file");
    println!("    --              Treat the next argument as the expression");
    println!();
    println!("ENVIRONMENT:");
    println!("    SPEL_LOGGING_ENABLE_CONSOLE=true   Log events to stderr");
    println!("    SPEL_LOGGING_MIN_LEVEL=debug       Minimum log level");
    println!("    SPEL_LEXICAL_TRACK_OPERATORS=true  Count operator usage");
    println!();
    println!("EXAMPLES:");
    println!("    {} \"name == 'x' and age >= 18\"", program_name);
    println!("    {} --raw --json \"T(java.lang.Math).PI\"", program_name);
    println!("    {} --file expression.spel --metrics", program_name);
}

fn print_table(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{:<24} {:>6}..{:<6} {:?}",
            token.kind.as_str(),
            token.start_offset(),
            token.end_offset(),
            token.lexeme
        );
    }
}

fn print_metrics(metrics: &LexicalMetrics) {
    println!();
    println!("tokens:      {}", metrics.total_tokens);
    println!("literals:    {}", metrics.literal_tokens);
    println!("keywords:    {}", metrics.keyword_tokens);
    println!("identifiers: {}", metrics.identifier_tokens);
    println!("operators:   {}", metrics.operator_tokens);
    println!("punctuation: {}", metrics.punctuation_tokens);
    println!("whitespace:  {}", metrics.whitespace_tokens);
    for (operator, count) in &metrics.operator_usage_patterns {
        println!("  {:<22} {}", operator, count);
    }
}

fn print_json(
    tokens: &[Token],
    metrics: Option<&LexicalMetrics>,
) -> Result<(), serde_json::Error> {
    let rendered = match metrics {
        Some(metrics) => serde_json::to_string_pretty(&serde_json::json!({
            "tokens": tokens,
            "metrics": metrics,
        }))?,
        None => serde_json::to_string_pretty(tokens)?,
    };
    println!("{}", rendered);
    Ok(())
}

fn report_lexer_error(text: &str, error: &LexerError) {
    let message = format!("[{}] {}", error.error_code(), error);
    match error.span() {
        Some(span) => eprintln!("{}", SourceMap::new(text.to_string()).format_error(&span, &message)),
        None => eprintln!("error: {}", message),
    }
}
