use anyhow::{Context, Result};
use crafting_explorer::{
    cli::{Cli, Commands},
    config::Settings,
    filter::creature_type_options,
    logging,
    session::{Event, Session},
    ui::{Browser, SilentUi},
    workbook::{load_dataset, load_logo},
    writer::{view_to_json, write_text},
};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            logging::init_file(&settings.log_file)?;

            let mut browser = Browser::new()?;
            let data = match load_dataset(&settings.workbook, &mut browser) {
                Ok(data) => data,
                Err(e) => {
                    // Leave the alternate screen before reporting
                    browser.restore()?;
                    tracing::error!(error = %e, "workbook failed to load");
                    return Err(e.into());
                }
            };

            let logo = load_logo(&settings.logo, &mut browser);
            browser.set_logo(logo);

            let mut session = Session::new(&data);
            browser.run(&mut session)?;
        }

        Commands::Query {
            search,
            creature_type,
            mode,
            harvest,
            json,
        } => {
            logging::init_stderr()?;

            let data = load_dataset(&settings.workbook, &mut SilentUi::new())?;
            let mut session = Session::new(&data);
            session.apply(Event::SetSearch(search))?;
            session.apply(Event::SetCreatureType(creature_type))?;
            session.apply(Event::SetMode(mode.into()))?;
            if harvest {
                session.apply(Event::ToggleHarvest)?;
            }

            let view = session.render();
            let stdout = io::stdout();
            let mut out = stdout.lock();

            if json {
                let doc = view_to_json(&view, session.state());
                serde_json::to_writer_pretty(&mut out, &doc).context("Failed to write JSON")?;
                writeln!(out)?;
            } else {
                write_text(&mut out, &view).context("Failed to write view")?;
            }
        }

        Commands::CreatureTypes => {
            logging::init_stderr()?;

            let data = load_dataset(&settings.workbook, &mut SilentUi::new())?;
            for option in creature_type_options(&data.recipes) {
                println!("{}", option);
            }
        }
    }

    Ok(())
}
