use structopt::StructOpt;

use message::{
    command::{
        SettingsRequest,
        SpaTemperature,
        SpaTime,
        TempScale,
        ToggleItem,
        WifiSettings,
    },
    Command,
};
use util::{
    bootstrap,
    build,
};

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(about = "print the hex frame for a command to the spa controller")]
enum Options {
    /// Request the controller's configuration.
    Config,

    /// Toggle a pump, the lights or the temperature range.
    Toggle {
        #[structopt(help = "pump1, pump2, lights or temp-range")]
        item: ToggleItem,
    },

    /// Set the target temperature, in the controller's current scale.
    SetTemp {
        #[structopt(help = "raw temperature byte (degrees F, or half degrees C)")]
        raw: u8,
    },

    /// Set the controller's clock.
    SetTime {
        hour:   u8,
        minute: u8,

        #[structopt(long = "24h", help = "display the clock in 24-hour format")]
        display_24h: bool,
    },

    /// Switch the temperature scale.
    Scale {
        #[structopt(help = "celsius or fahrenheit")]
        scale: TempScale,
    },

    /// Request one of the controller's settings pages.
    Settings(Settings),

    /// Configure the controller's Wi-Fi module.
    Wifi { ssid: String, passkey: String },
}

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
enum Settings {
    Panel,
    FilterCycles,
    Information,
    Preferences,
    FaultLog {
        #[structopt(default_value = "255", help = "log entry; 255 is the most recent")]
        entry: u8,
    },
}

impl From<Settings> for SettingsRequest {
    fn from(s: Settings) -> Self {
        match s {
            Settings::Panel => SettingsRequest::Panel,
            Settings::FilterCycles => SettingsRequest::FilterCycles,
            Settings::Information => SettingsRequest::Information,
            Settings::Preferences => SettingsRequest::Preferences,
            Settings::FaultLog {
                entry,
            } => SettingsRequest::FaultLog {
                entry,
            },
        }
    }
}

fn command(opts: Options) -> eyre::Result<Command> {
    let cmd = match opts {
        Options::Config => Command::ConfigRequest,
        Options::Toggle {
            item,
        } => Command::Toggle(item),
        Options::SetTemp {
            raw,
        } => Command::SetTemperature(SpaTemperature::raw(raw)),
        Options::SetTime {
            hour,
            minute,
            display_24h,
        } => Command::SetTime(SpaTime::new(hour, minute, display_24h)?),
        Options::Scale {
            scale,
        } => Command::SetTempScale(scale),
        Options::Settings(s) => Command::Settings(s.into()),
        Options::Wifi {
            ssid,
            passkey,
        } => Command::SetWifi(WifiSettings::new(ssid, passkey)?),
    };

    Ok(cmd)
}

fn main() -> eyre::Result<()> {
    let opts = Options::from_args();
    bootstrap!("{}", build::describe());

    let cmd = command(opts)?;
    let encoded = cmd.encode()?;

    eprintln!("{:?} ({}):", cmd.kind(), cmd.kind().id());
    println!("{}", hex::encode(encoded));

    Ok(())
}
