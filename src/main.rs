use clap::{Args, Parser, Subcommand};
use hvac_sizing_toolbox::{
    app, config,
    form::FormState,
    i18n::{self, Translator},
    session::{self, Adjustments},
    ui_cli,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hvac_sizing_toolbox_cli")]
#[command(about = "Ventilation volume flow and supply-air temperature sizing", long_about = None)]
struct Cli {
    /// Language: auto, de, en, ko
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,
    /// Path to the configuration file
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one room and print the result
    Size(SizeArgs),
}

#[derive(Args)]
struct SizeArgs {
    /// Room area [m²]
    #[arg(long)]
    area: f64,
    /// Room height [m]
    #[arg(long)]
    height: f64,
    /// Heating load [kW]
    #[arg(long, default_value_t = 0.0)]
    heating_kw: f64,
    /// Cooling load [kW]
    #[arg(long, default_value_t = 0.0)]
    cooling_kw: f64,
    /// Room temperature [°C]
    #[arg(long, default_value_t = 21.0, allow_negative_numbers = true)]
    room_temp: f64,
    /// Slider minimum [m³/h], applied after the recommended range
    #[arg(long)]
    min: Option<f64>,
    /// Slider maximum [m³/h], applied after the recommended range
    #[arg(long)]
    max: Option<f64>,
    /// Selected volume flow [m³/h]; defaults to the hygienic flow
    #[arg(long)]
    flow: Option<f64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 대화형 메뉴 또는 단일 계산을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_from(&cli.config)?;
    tracing_subscriber::fmt()
        .with_max_level(cfg.tracing_level())
        .with_writer(std::io::stderr)
        .init();

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    match &cli.command {
        Some(Commands::Size(args)) => run_size(args, &tr),
        None => app::run(&mut cfg, &cli.config, &mut tr)?,
    }
    Ok(())
}

/// 인자로 받은 실 데이터와 조작을 폼 이벤트 순서대로 재생해 출력한다.
fn run_size(args: &SizeArgs, tr: &Translator) {
    let mut form = FormState {
        room_area: args.area.to_string(),
        room_height: args.height.to_string(),
        heating_load_kw: args.heating_kw.to_string(),
        cooling_load_kw: args.cooling_kw.to_string(),
        room_temperature: args.room_temp.to_string(),
        ..FormState::default()
    };
    let outcome = session::replay(
        &mut form,
        &Adjustments {
            min_m3_per_h: args.min,
            max_m3_per_h: args.max,
            flow_m3_per_h: args.flow,
        },
    );
    ui_cli::print_outcome(tr, &outcome);
}
