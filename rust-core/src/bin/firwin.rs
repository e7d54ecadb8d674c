//! Command-line FIR filter designer
//!
//! Prints a header block, one coefficient per line and the coefficient sum.

use clap::Parser;
use firwin::{firwin, DesignError, DesignOptions, FilterSpec, WindowKind};
use log::{info, warn};
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Design a FIR filter using the window method",
    allow_negative_numbers = true,
    after_help = "Examples:\n  firwin 51 1000.0 1 200.0 300.0\n  firwin 101 44100.0 hann 500.0 1000.0 3000.0 4000.0"
)]
struct Args {
    /// Number of filter taps (odd recommended)
    numtaps: usize,

    /// Sampling frequency in Hz
    fs: f64,

    /// Window type, number or name: 0=Rectangular, 1=Hamming, 2=Blackman,
    /// 3=Triangular, 4=Parzen, 5=Bohman, 6=Nuttall, 7=Blackman-Harris,
    /// 8=Flattop, 9=Bartlett, 10=Hann, 11=Cosine
    window_type: WindowKind,

    /// Cutoff frequencies in Hz, an even number of them (passband pairs)
    #[arg(required = true)]
    cutoffs: Vec<f64>,
}

/// Reasons the command exits with status 1
#[derive(Error, Debug)]
enum CliError {
    #[error("Number of cutoff frequencies must be even.")]
    OddCutoffCount,

    #[error(transparent)]
    Design(#[from] DesignError),

    #[error("Failed writing output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too
            if let Err(io_err) = e.print() {
                warn!("Could not print usage: {}", io_err);
            }
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Design(e)) => {
            eprintln!("Error designing filter: {}", e);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Design the filter described by `args` and write the report to `out`
///
/// The header is written before the design runs, so a rejected spec still
/// leaves the header in `out`.
fn run(args: Args, out: &mut impl Write) -> Result<(), CliError> {
    if args.cutoffs.len() % 2 != 0 {
        return Err(CliError::OddCutoffCount);
    }

    info!("Window {} selected (code {})", args.window_type, args.window_type.code());

    writeln!(out, "# FIR Filter Design")?;
    writeln!(out, "# Taps: {}", args.numtaps)?;
    writeln!(out, "# Sampling frequency: {:.1} Hz", args.fs)?;
    writeln!(out, "# Window: {}", args.window_type)?;
    let cutoffs: String = args.cutoffs.iter().map(|c| format!("{:.1} ", c)).collect();
    writeln!(out, "# Cutoffs: {}Hz", cutoffs)?;
    writeln!(out)?;

    let spec = FilterSpec::new(args.numtaps, args.fs, args.cutoffs, args.window_type);
    let h = firwin(&spec, DesignOptions::default())?;

    writeln!(out, "# Coefficients:")?;
    for c in h.iter() {
        writeln!(out, "{}", format_g(*c, 15))?;
    }

    let sum: f64 = h.iter().sum();
    writeln!(out)?;
    writeln!(out, "# Sum of coefficients: {}", format_g(sum, 15))?;
    out.flush()?;

    Ok(())
}

/// Format like C's `%.<precision>g`
///
/// Fixed notation when the decimal exponent X satisfies -4 <= X < precision,
/// scientific otherwise; trailing zeros are removed in both.
fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Drop trailing fractional zeros and a dangling decimal point
fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["firwin"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    fn render(argv: &[&str]) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = run(args(argv), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_report_layout() {
        let (result, text) = render(&["1", "1000", "0", "0", "100"]);
        assert!(result.is_ok());
        assert_eq!(
            text,
            "# FIR Filter Design\n\
             # Taps: 1\n\
             # Sampling frequency: 1000.0 Hz\n\
             # Window: Rectangular (boxcar)\n\
             # Cutoffs: 0.0 100.0 Hz\n\
             \n\
             # Coefficients:\n\
             1\n\
             \n\
             # Sum of coefficients: 1\n"
        );
    }

    #[test]
    fn test_run_bandpass_report() {
        let (result, text) = render(&["51", "1000.0", "HAMMING", "200.0", "300.0"]);
        assert!(result.is_ok());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "# Taps: 51");
        assert_eq!(lines[3], "# Window: Hamming");
        assert_eq!(lines[4], "# Cutoffs: 200.0 300.0 Hz");
        assert_eq!(lines[6], "# Coefficients:");

        let coeffs: Vec<f64> = lines[7..58].iter().map(|l| l.parse().unwrap()).collect();
        assert_eq!(coeffs.len(), 51);
        for i in 0..25 {
            assert!((coeffs[i] - coeffs[50 - i]).abs() < 1e-12);
        }

        assert_eq!(lines[58], "");
        let sum: f64 = lines[59]
            .strip_prefix("# Sum of coefficients: ")
            .unwrap()
            .parse()
            .unwrap();
        assert!((sum - coeffs.iter().sum::<f64>()).abs() < 1e-12);
        assert_eq!(lines.len(), 60);
    }

    #[test]
    fn test_run_odd_cutoff_count() {
        let (result, text) = render(&["51", "1000.0", "hamming", "200.0"]);
        assert!(matches!(result, Err(CliError::OddCutoffCount)));
        assert!(text.is_empty());
    }

    #[test]
    fn test_run_design_failure() {
        let (result, text) = render(&["51", "1000.0", "hann", "300.0", "200.0"]);
        assert!(matches!(
            result,
            Err(CliError::Design(DesignError::InvalidCutoffOrdering { .. }))
        ));
        assert!(text.starts_with("# FIR Filter Design\n"));
        assert!(!text.contains("# Coefficients:"));

        let (result, _) = render(&["18446744073709551615", "1000", "hann", "300", "200"]);
        assert!(matches!(result, Err(CliError::Design(_))));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_write_failure() {
        let result = run(args(&["51", "1000.0", "hann", "0", "200"]), &mut ClosedPipe);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_format_g_fixed() {
        assert_eq!(format_g(0.0, 15), "0");
        assert_eq!(format_g(1.0, 15), "1");
        assert_eq!(format_g(-0.5, 15), "-0.5");
        assert_eq!(format_g(0.1, 15), "0.1");
        assert_eq!(format_g(123456.789, 15), "123456.789");
        assert_eq!(format_g(0.0001, 15), "0.0001");
        assert_eq!(format_g(1.0 / 3.0, 15), "0.333333333333333");
    }

    #[test]
    fn test_format_g_scientific() {
        assert_eq!(format_g(0.00001, 15), "1e-05");
        assert_eq!(format_g(-2.5e-7, 15), "-2.5e-07");
        assert_eq!(format_g(1e15, 15), "1e+15");
        assert_eq!(format_g(1.234e100, 15), "1.234e+100");
    }

    #[test]
    fn test_format_g_non_finite() {
        assert_eq!(format_g(f64::NAN, 15), "nan");
        assert_eq!(format_g(f64::INFINITY, 15), "inf");
        assert_eq!(format_g(f64::NEG_INFINITY, 15), "-inf");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["firwin", "51", "1000.0", "hamming", "200.0", "300.0"]).unwrap();
        assert_eq!(args.numtaps, 51);
        assert_eq!(args.window_type, WindowKind::Hamming);
        assert_eq!(args.cutoffs, vec![200.0, 300.0]);

        let by_code = Args::try_parse_from(["firwin", "51", "1000.0", "1", "200.0", "300.0"]).unwrap();
        assert_eq!(by_code.window_type, WindowKind::Hamming);

        let negative = Args::try_parse_from(["firwin", "51", "1000.0", "hann", "-5", "300"]).unwrap();
        assert_eq!(negative.cutoffs, vec![-5.0, 300.0]);
    }

    #[test]
    fn test_args_rejected() {
        assert!(Args::try_parse_from(["firwin", "51", "1000.0", "kaiser", "200.0"]).is_err());
        assert!(Args::try_parse_from(["firwin", "51", "1000.0", "hann"]).is_err());
        assert!(Args::try_parse_from(["firwin", "many", "1000.0", "hann", "1", "2"]).is_err());
    }
}
