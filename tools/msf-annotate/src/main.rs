mod console;

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use msf_engine::{Ambiguity, Annotator, Choice, FixedPolicy, LanguageProfile, Oracle};
use msf_protocol::RuleTables;
use msf_tree::record::SentenceRecord;

use crate::console::ConsoleOracle;

#[derive(Parser)]
#[command(author, version, about = "Adds the morpho-syntactic feature layer to UD trees")]
struct Cli {
    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate a JSON Lines file of sentences
    Annotate(AnnotateArgs),
    /// Compile JSON rule tables to an rkyv archive
    CompileRules {
        #[command(flatten)]
        rules: RulesArgs,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print rule tables as JSON
    DumpRules {
        #[command(flatten)]
        rules: RulesArgs,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RulesArgs {
    /// Built-in rule tables (eng, eng-case, srp)
    #[arg(short, long, default_value = "eng", conflicts_with = "rules")]
    language: String,

    /// Rule tables from a .json file or an rkyv archive
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OracleKind {
    Console,
    Fixed,
}

#[derive(Args)]
struct AnnotateArgs {
    #[command(flatten)]
    rules: RulesArgs,

    /// Input sentences, one JSON object per line ("-" for stdin)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    input: PathBuf,

    /// Annotated sentences and error records (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "console")]
    oracle: OracleKind,

    /// Fixed answer for the `fixed` oracle, e.g. `conditional-aux=conditional`
    #[arg(short, long = "answer", value_name = "KIND=CHOICE", value_parser = parse_answer)]
    answers: Vec<(Ambiguity, Choice)>,

    /// Worker threads (0 picks one per core)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Seconds to wait for the operator (0 waits forever)
    #[arg(long, default_value_t = 300)]
    oracle_timeout_secs: u64,
}

fn parse_answer(arg: &str) -> Result<(Ambiguity, Choice), String> {
    let (kind, choice) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=CHOICE, got {:?}", arg))?;
    let kind: Ambiguity = serde_json::from_value(serde_json::Value::String(kind.trim().to_string()))
        .map_err(|_| format!("unknown ambiguity {:?} (inversion, conditional-aux, past-modal)", kind))?;
    let choice: Choice = serde_json::from_value(serde_json::Value::String(choice.trim().to_string()))
        .map_err(|_| format!("unknown choice {:?}", choice))?;
    if !kind.options().contains(&choice) {
        return Err(format!("{:?} cannot be answered with {:?}", kind, choice));
    }
    Ok((kind, choice))
}

fn load_tables(args: &RulesArgs) -> anyhow::Result<RuleTables> {
    let profile = match &args.rules {
        None => LanguageProfile::builtin(&args.language)?,
        Some(path) if path.extension().map_or(false, |ext| ext == "json") => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            LanguageProfile::from_json(&json).with_context(|| format!("loading {:?}", path))?
        }
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
            LanguageProfile::from_archive(&bytes).with_context(|| format!("loading {:?}", path))?
        }
    };
    Ok(profile.tables().clone())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<SentenceRecord>> {
    let reader: Box<dyn Read> = if path == Path::new("-") {
        Box::new(io::stdin())
    } else {
        Box::new(fs::File::open(path).with_context(|| format!("opening {:?}", path))?)
    };

    let mut records = Vec::new();
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.with_context(|| format!("reading {:?}", path))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: SentenceRecord = serde_json::from_str(&line)
            .with_context(|| format!("{:?} line {}", path, number + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).with_context(|| format!("creating {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    // 1. Rules
    let profile = LanguageProfile::new(load_tables(&args.rules)?)?;
    log::info!("rules for {:?} loaded", profile.language());

    // 2. Oracle
    let oracle: Box<dyn Oracle + Send> = match args.oracle {
        OracleKind::Fixed => {
            let policy = args
                .answers
                .iter()
                .fold(FixedPolicy::new(), |policy, (kind, choice)| policy.with(*kind, *choice));
            Box::new(policy)
        }
        OracleKind::Console => {
            if args.input == Path::new("-") {
                bail!("the console oracle reads stdin; pass sentences with --input FILE");
            }
            let timeout = match args.oracle_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            Box::new(ConsoleOracle::spawn(timeout))
        }
    };

    // 3. Sentences
    let records = read_records(&args.input)?;
    log::info!("{} sentences read from {:?}", records.len(), args.input);

    let report = Annotator::new(profile).annotate_batch(records, oracle, args.jobs)?;

    // 4. Output in input order
    let mut out = open_output(args.output.as_deref())?;
    for outcome in &report.outcomes {
        serde_json::to_writer(&mut out, outcome)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn compile_rules(rules: RulesArgs, output: PathBuf) -> anyhow::Result<()> {
    let tables = load_tables(&rules)?;
    let bytes = LanguageProfile::to_archive(&tables)?;
    fs::write(&output, bytes.as_slice()).with_context(|| format!("writing {:?}", output))?;
    log::info!("{} rules archived to {:?} ({} bytes)", tables.language, output, bytes.len());
    Ok(())
}

fn dump_rules(rules: RulesArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let tables = load_tables(&rules)?;
    let mut out = open_output(output.as_deref())?;
    serde_json::to_writer_pretty(&mut out, &tables)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Annotate(args) => annotate(args),
        Command::CompileRules { rules, output } => compile_rules(rules, output),
        Command::DumpRules { rules, output } => dump_rules(rules, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("conditional-aux=future-in-past"),
            Ok((Ambiguity::ConditionalAux, Choice::FutureInPast))
        );
        assert!(parse_answer("past-modal=interrogative").is_err());
        assert!(parse_answer("inversion").is_err());
        assert!(parse_answer("mood=past").is_err());
    }

    #[test]
    fn test_cli_shape() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
