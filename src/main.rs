use clap::{Parser, ValueEnum};
use prednc::{extract_features, predict_contacts, AtomType, Feature, SepRange};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{trace, Level};

/// Output selector for the `--atom` flag.
///
/// `feat` is not an atom type; it switches the output to the raw feature
/// vector instead of predicted contact numbers.
#[derive(ValueEnum, Clone, Debug, Copy)]
enum AtomArg {
    /// C-beta contacts
    #[value(name = "CB")]
    Cb,
    /// C-alpha contacts
    #[value(name = "CA")]
    Ca,
    /// Print feature values instead of predicted contact numbers
    #[value(name = "feat")]
    Feat,
}

impl std::fmt::Display for AtomArg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AtomArg::Cb => write!(f, "CB"),
            AtomArg::Ca => write!(f, "CA"),
            AtomArg::Feat => write!(f, "feat"),
        }
    }
}

/// Predict the number of residue-residue contacts for the short (6<=|i-j|<12),
/// medium (12<=|i-j|<24), long (24<=|i-j|) and all (6<=|i-j|) separation
/// ranges from sequence-based predictions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Stage 2 secondary structure prediction by PSIPRED 4
    ss2: PathBuf,

    /// Solvent accessibility prediction by the metapsicov "solvpred" program
    solv: PathBuf,

    /// Coefficient set to use, or `feat` to print the raw feature values
    #[arg(short, long, default_value_t = AtomArg::Cb)]
    atom: AtomArg,

    /// Count secondary structure composition from class probabilities (true)
    /// or from the one-hot predicted classes (false)
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    use_prob: bool,

    /// Model id, composed additively from 1 (ss + acc), 2 (helix/other +
    /// acc), 4 (ss only) and 8 (length only)
    #[arg(short, long, default_value_t = 1)]
    model: u32,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    trace!("{args:?}");

    let feats = extract_features(&args.ss2, &args.solv, args.use_prob)?;

    match args.atom {
        AtomArg::Feat => {
            let header: Vec<String> = Feature::ALL.iter().map(|f| f.to_string()).collect();
            let values: Vec<String> = Feature::ALL
                .iter()
                .map(|f| format!("{:.1}", feats.value(*f)))
                .collect();
            eprintln!("{}", header.join("\t"));
            println!("{}", values.join("\t"));
        }
        atom => {
            let atom = AtomType::from_str(&atom.to_string())?;
            let nc = predict_contacts(&feats, args.model, atom)?;
            let header: Vec<String> = SepRange::ALL.iter().map(|s| s.to_string()).collect();
            let values: Vec<String> = SepRange::ALL
                .iter()
                .map(|s| format!("{:.1}", nc.value(*s)))
                .collect();
            eprintln!("{}", header.join("\t"));
            println!("{}", values.join("\t"));
        }
    }

    Ok(())
}
