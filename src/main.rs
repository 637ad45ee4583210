use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use solrtype_core::{to_safe_json, SolrFieldType, Variant};
use solrtype_storage::FieldTypeStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Generate Solr schema artifacts from field type configurations
#[derive(Parser, Debug)]
#[command(name = "solrtype")]
#[command(about = "Render Solr field types and their dynamic fields", long_about = None)]
struct Args {
    /// Field type config file, or a directory of `*.json` configs
    #[arg(short, long, default_value = "./field_types")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a field type as a schema.xml fragment
    Xml {
        id: String,
        #[arg(long, value_enum, default_value_t = VariantArg::Base)]
        variant: VariantArg,
        /// Print the solrconfig.xml snippets instead
        #[arg(long)]
        solrconfig: bool,
        /// Omit the label comment
        #[arg(long)]
        no_comment: bool,
    },
    /// Print a field type in Solr's JSON field type format
    Json {
        id: String,
        #[arg(long, value_enum, default_value_t = VariantArg::Base)]
        variant: VariantArg,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the dynamic fields derived from a field type
    DynamicFields {
        id: String,
        #[arg(long)]
        solr_major_version: Option<u32>,
        #[arg(long, value_enum, default_value_t = Format::Xml)]
        format: Format,
    },
    /// Report whether a field type needs a managed schema
    Managed { id: String },
    /// List the content domains covered by the loaded field types
    Domains,
    /// List the custom codes used by the loaded field types
    CustomCodes,
    /// Write a field type's auxiliary text files into a directory
    TextFiles {
        id: String,
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Base,
    Spellcheck,
    Unstemmed,
    Collated,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Base => Variant::Base,
            VariantArg::Spellcheck => Variant::Spellcheck,
            VariantArg::Unstemmed => Variant::Unstemmed,
            VariantArg::Collated => Variant::Collated,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Xml,
    Json,
}

fn load_store(path: &Path) -> anyhow::Result<FieldTypeStore> {
    let store = if path.is_dir() {
        FieldTypeStore::open(path)?
    } else {
        FieldTypeStore::from_field_types([FieldTypeStore::load_file(path)?])?
    };
    debug!("{} field types available", store.len());
    Ok(store)
}

fn variant_as_json(field_type: &SolrFieldType, variant: Variant, pretty: bool) -> anyhow::Result<String> {
    let json = match variant {
        Variant::Base => field_type.field_type_as_json(pretty)?,
        Variant::Spellcheck => field_type.spellcheck_field_type_as_json(pretty)?,
        Variant::Unstemmed => field_type.unstemmed_field_type_as_json(pretty)?,
        Variant::Collated => field_type.collated_field_type_as_json(pretty)?,
    };
    Ok(json)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("solrtype v{}", env!("CARGO_PKG_VERSION"));
    info!("Config: {:?}", args.config);

    let store = load_store(&args.config)
        .with_context(|| format!("failed to load field types from {:?}", args.config))?;

    match args.command {
        Command::Xml { id, variant, solrconfig, no_comment } => {
            let field_type = store.require(&id)?;
            let xml = if solrconfig {
                field_type.solr_configs_as_xml(!no_comment)
            } else {
                field_type.variant_as_xml(variant.into(), !no_comment)?
            };
            print!("{}", xml);
        }
        Command::Json { id, variant, pretty } => {
            let field_type = store.require(&id)?;
            println!("{}", variant_as_json(field_type, variant.into(), pretty)?);
        }
        Command::DynamicFields { id, solr_major_version, format } => {
            let field_type = store.require(&id)?;
            let fields = field_type.dynamic_fields(solr_major_version)?;
            match format {
                Format::Xml => {
                    for field in &fields {
                        print!("{}", field.to_xml());
                    }
                }
                Format::Json => println!("{}", to_safe_json(&fields, true)?),
            }
        }
        Command::Managed { id } => {
            let field_type = store.require(&id)?;
            println!("{}", field_type.requires_managed_schema());
        }
        Command::Domains => {
            for domain in store.available_domains() {
                println!("{}", domain);
            }
        }
        Command::CustomCodes => {
            for code in store.available_custom_codes() {
                println!("{}", code);
            }
        }
        Command::TextFiles { id, out_dir } => {
            let field_type = store.require(&id)?;
            let written = FieldTypeStore::write_text_files(field_type, &out_dir)
                .with_context(|| format!("failed to write text files to {:?}", out_dir))?;
            info!("Wrote {} text files", written.len());
            for path in written {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
