use gamelife::{ConfigError, Settings, input};
use std::fmt;

const USAGE: &str =
    "usage: gamelife [options] [WINDOW_WIDTH [WINDOW_HEIGHT [CELL_SIZE [SPEED [RANDOMIZE]]]]]";

pub struct Args {
    matches: getopts::Matches,
    settings: Settings,
}

/// Why the command line could not be turned into [`Args`]
#[derive(Debug)]
pub enum OptionsError {
    Parse(getopts::Fail),
    BadSeed(String),
    Config(ConfigError),
}
impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(fail) => write!(f, "{fail}"),
            Self::BadSeed(seed) => write!(f, "seed must be an unsigned integer, got {seed:?}"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}
impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(fail) => Some(fail),
            Self::BadSeed(_) => None,
            Self::Config(err) => Some(err),
        }
    }
}
impl From<ConfigError> for OptionsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optflag("", "help", "print this help menu");
    opts.optflag("c", "console", "run in the terminal instead of a window");
    opts.optopt("s", "seed", "seed the random number generator", "SEED");
    opts
}

/// The full help text: flags, positional parameters and key bindings
pub fn usage() -> String {
    let mut usage = options().usage(USAGE);
    usage.push_str(
        "\npositional parameters (all optional):\n    \
         WINDOW_WIDTH   window width in pixels (default 640)\n    \
         WINDOW_HEIGHT  window height in pixels (default 480)\n    \
         CELL_SIZE      pixels per cell (default 10)\n    \
         SPEED          generations per second (default 1)\n    \
         RANDOMIZE      nonzero to start from a random board (default 0)\n\n",
    );
    usage.push_str(&input::bindings_help());
    usage
}

impl Args {
    /// Parses the arguments, returning `Ok(None)` when help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, OptionsError> {
        let matches = options()
            .parse(args.iter().map(T::as_ref))
            .map_err(OptionsError::Parse)?;
        if matches.opt_present("help") {
            return Ok(None);
        }

        let seed = match matches.opt_str("seed") {
            Some(seed) => Some(seed.parse().map_err(|_| OptionsError::BadSeed(seed))?),
            None => None,
        };
        let settings = Settings::from_positional(matches.free.as_slice())?.with_seed(seed);
        Ok(Some(Self { matches, settings }))
    }
    pub fn from_env() -> Result<Option<Self>, OptionsError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
