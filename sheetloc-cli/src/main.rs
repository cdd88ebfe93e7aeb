use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::info;

use sheetloc::{
    LocaleTable, ReverseOptions, SinkMode, TranslateOptions, Translator, XlsxGrid, XmlToJson,
    config,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_MISSING_ARG: i32 = 1;
const EXIT_RUNTIME_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Logging level: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "error")]
    level: String,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a translation workbook to JSON (iOS) and XML (Android)
    /// localization files, one per language column. JSON files are written
    /// to the output directory, XML files inside per-language
    /// subdirectories; by default everything is packed into a zip archive.
    Translate {
        /// Path to the .xlsx translation workbook
        file: Option<PathBuf>,

        /// Comma-separated list of output formats
        #[arg(short, long, default_value = "json,xml")]
        out: String,

        /// Write output directly to the filesystem instead of a zip archive
        #[arg(short, long)]
        filesystem: bool,

        /// <start_col>,<end_col>; an end of 0 means the last column
        #[arg(short, long, default_value = "6,0")]
        cols: String,

        /// <start_row>,<end_row>; an end of 0 means the last row
        #[arg(short, long, default_value = "3,0")]
        rows: String,

        /// <json_lang_row>,<xml_lang_row>: header rows naming each language
        /// for the two output formats
        #[arg(long, default_value = "2,1")]
        lang_rows: String,

        /// Column of the English (fallback) text; relevant for JSON output
        #[arg(short = 'e', long, default_value_t = config::DEFAULT_ENGLISH_COL)]
        english_col: u32,

        /// Column of the translation keys
        #[arg(long, default_value_t = config::DEFAULT_KEY_COL)]
        key_col: u32,

        /// Column of the per-row CDATA flag
        #[arg(long, default_value_t = config::DEFAULT_CDATA_COL)]
        cdata_col: u32,

        /// Column of the per-row translatable flag
        #[arg(long, default_value_t = config::DEFAULT_TRANS_COL)]
        trans_col: u32,

        /// Abort the whole run on the first per-column error
        #[arg(long)]
        stop_on_err: bool,

        /// Keep processing past blank key cells. By default a blank key ends
        /// a column, since the workbook carries blank padding rows at the
        /// bottom.
        #[arg(long)]
        continue_on_null: bool,

        /// Locale code/name table used for JSON output
        #[arg(long, default_value = config::LOCALE_FILE_NAME)]
        locale_file: PathBuf,
    },

    /// Convert Android XML language files to iOS JSON format. Inputs may be
    /// values-<lang>/strings.xml files, bare <lang>.xml files, or zip
    /// archives of either.
    Xml2json {
        /// Input XML files and/or zip archives
        files: Vec<PathBuf>,

        /// Write output directly to the filesystem instead of a zip archive
        #[arg(short, long)]
        filesystem: bool,

        /// Stop at the first failing input instead of skipping it
        #[arg(long)]
        stop_on_err: bool,

        /// Locale code/name table
        #[arg(long, default_value = config::LOCALE_FILE_NAME)]
        locale_file: PathBuf,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(&args.level);

    let code = match args.command {
        Commands::Translate {
            file,
            out,
            filesystem,
            cols,
            rows,
            lang_rows,
            english_col,
            key_col,
            cdata_col,
            trans_col,
            stop_on_err,
            continue_on_null,
            locale_file,
        } => run_translate(TranslateArgs {
            file,
            out,
            filesystem,
            cols,
            rows,
            lang_rows,
            english_col,
            key_col,
            cdata_col,
            trans_col,
            stop_on_err,
            continue_on_null,
            locale_file,
        }),
        Commands::Xml2json {
            files,
            filesystem,
            stop_on_err,
            locale_file,
        } => run_xml2json(files, filesystem, stop_on_err, locale_file),
    };
    std::process::exit(code);
}

struct TranslateArgs {
    file: Option<PathBuf>,
    out: String,
    filesystem: bool,
    cols: String,
    rows: String,
    lang_rows: String,
    english_col: u32,
    key_col: u32,
    cdata_col: u32,
    trans_col: u32,
    stop_on_err: bool,
    continue_on_null: bool,
    locale_file: PathBuf,
}

fn run_translate(args: TranslateArgs) -> i32 {
    let Some(file) = args.file else {
        eprintln!(
            "Need exactly one argument: path to the .xlsx file of language \
             translations to be converted"
        );
        return EXIT_MISSING_ARG;
    };

    let (start_col, end_col) = match parse_pair(&args.cols, "--cols") {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("{}", message);
            return EXIT_MISSING_ARG;
        }
    };
    let (start_row, end_row) = match parse_pair(&args.rows, "--rows") {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("{}", message);
            return EXIT_MISSING_ARG;
        }
    };
    let (json_lang_row, xml_lang_row) = match parse_pair(&args.lang_rows, "--lang-rows") {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("{}", message);
            return EXIT_MISSING_ARG;
        }
    };

    let options = TranslateOptions {
        start_row,
        end_row,
        start_col,
        end_col,
        json_lang_row,
        xml_lang_row,
        key_col: args.key_col,
        default_col: args.english_col,
        cdata_col: args.cdata_col,
        trans_col: args.trans_col,
        stop_on_null: !args.continue_on_null,
        stop_on_err: args.stop_on_err,
        sink: sink_mode(args.filesystem),
        ..TranslateOptions::default()
    };

    let run = || -> Result<(), sheetloc::Error> {
        let grid = XlsxGrid::open(&file)?;
        let translator = Translator::new(grid, options)?;

        if args.out.contains("json") {
            let locales = LocaleTable::load(&args.locale_file)?;
            translator.to_json(&locales)?;
            if args.filesystem {
                info!("wrote iOS language translation files to local files");
            } else {
                info!(
                    "wrote iOS language translation files to \"{}\"",
                    config::JSON_ARCHIVE_NAME
                );
            }
        }
        if args.out.contains("xml") {
            translator.to_xml()?;
            if args.filesystem {
                info!("wrote Android language translation files to local values directories");
            } else {
                info!(
                    "wrote Android language translation files to \"{}\"",
                    config::XML_ARCHIVE_NAME
                );
            }
        }
        Ok(())
    };

    match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Processing failed. {}", e);
            EXIT_RUNTIME_ERROR
        }
    }
}

fn run_xml2json(
    files: Vec<PathBuf>,
    filesystem: bool,
    stop_on_err: bool,
    locale_file: PathBuf,
) -> i32 {
    if files.is_empty() {
        eprintln!(
            "Need at least one argument: an input Android language file to \
             convert to iOS JSON format"
        );
        return EXIT_MISSING_ARG;
    }

    let run = || -> Result<(), sheetloc::Error> {
        let locales = LocaleTable::load(&locale_file)?;
        let reverser = XmlToJson::new(
            &locales,
            ReverseOptions {
                stop_on_err,
                sink: sink_mode(filesystem),
                ..ReverseOptions::default()
            },
        );
        reverser.run(&files)
    };

    match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Processing failed. {}", e);
            EXIT_RUNTIME_ERROR
        }
    }
}

fn sink_mode(filesystem: bool) -> SinkMode {
    if filesystem {
        SinkMode::Filesystem
    } else {
        SinkMode::Archive
    }
}

/// Parses a `<start>,<end>` pair of numbers.
fn parse_pair(value: &str, flag: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(format!(
            "The argument to {} should be a comma-separated pair: <start>,<end>. It is \"{}\"",
            flag, value
        ));
    }
    let start = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid number \"{}\" in {}", parts[0], flag))?;
    let end = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid number \"{}\" in {}", parts[1], flag))?;
    Ok((start, end))
}

fn init_logging(level: &str) {
    let level = tracing::Level::from_str(level).unwrap_or(tracing::Level::ERROR);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
