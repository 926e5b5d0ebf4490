use std::io::Write;

use anyhow::Context;
use config::Config;
use console::Console;
use fetcher::Fetcher;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use tokio::io::{AsyncBufRead, BufReader};

mod backup;
mod config;
mod console;
mod converter;
mod csv_log;
mod fetcher;
mod measurement;
mod response;
#[cfg(test)]
mod test_support;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Readings appended to the CSV log.
    Saved,
    /// Device unreachable or answered something other than 200.
    FetchFailed,
    /// Device reported an error or left out its readings.
    Unusable,
    /// Conversion failed; the raw response went to the backup file.
    BackedUp,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());

    match run(&Config::default(), &mut console).await {
        Ok(outcome) => log::info!("Finished: {outcome:?}"),
        Err(e) => {
            log::error!("{e:#}");
            console.say(format!("Une erreur inattendue est survenue : {e}"))?;
            console.pause().await?;
        }
    }

    Ok(())
}

pub async fn run<R, W>(config: &Config, console: &mut Console<R, W>) -> Result<Outcome, anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("Bienvenue sur le programme de rapatriement de données airFlux !")?;
    console.say("Veuillez-vous connecter au réseau airFlux.135(...).")?;
    console.say("Appuyer sur entrée une fois connecté...\n\n")?;
    console.pause().await?;

    console.say("Récupération des données en cours...")?;
    let fetcher = Fetcher::new(config).context("Failed to initialize HTTP client")?;
    let Some(response) = fetcher.fetch().await.context("Failed to fetch data")? else {
        console.say("Erreur lors de la récupération des données.")?;
        console.pause().await?;
        return Ok(Outcome::FetchFailed);
    };

    console.say("Données récupérées avec succès !")?;
    console.say("Conversion et enregistrement des données en cours...")?;

    match converter::convert(Some(&response), &config.csv_path) {
        Ok(true) => {
            console.say("Conversion et enregistrement des données terminées avec succès !")?;
            console.say(format!(
                "Les données se trouvent dans le fichier {}",
                config.csv_path.display()
            ))?;
            console.say("\n\nMerci d'avoir utilisé le programme !")?;
            console.pause().await?;
            Ok(Outcome::Saved)
        }
        Ok(false) => {
            console.say("Les données reçues sont inexploitables (erreur de l'appareil ou données manquantes).")?;
            console.pause().await?;
            Ok(Outcome::Unusable)
        }
        Err(e) => {
            log::error!("Conversion failed: {e}");
            console.say(format!(
                "Une erreur est survenue lors de la conversion des données : {e}"
            ))?;
            console.say(format!(
                "Les données vont être perdues à la fermeture du programme. Si vous souhaitez les récupérer, appuyer sur entrée pour les afficher et les enregistrer dans \"{}\".",
                config.backup_path.display()
            ))?;
            console.pause().await?;
            console.say(
                serde_json::to_string_pretty(&response).context("Failed to serialize response")?,
            )?;
            backup::write(&response, &config.backup_path)?;
            console.pause().await?;
            Ok(Outcome::BackedUp)
        }
    }
}
