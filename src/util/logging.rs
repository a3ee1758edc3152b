use std::collections::HashMap;
use std::sync::RwLock;

pub(crate) static LOGGER_CONFIG: once_cell::sync::Lazy<RwLock<LoggingConfig>> =
    once_cell::sync::Lazy::new(|| RwLock::new(LoggingConfig::default()));

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub enum LogLevel {
    INFO,
    VERBOSE,
}

#[macro_export]
macro_rules! logln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC) {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! logvbln {
    ($fmt:literal) => {
        if $crate::util::logging::is_enabled(Self::CC)
            && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE)
        {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::util::logging::is_enabled(Self::CC)
            && $crate::util::logging::is_at_level(Self::CC, $crate::util::logging::LogLevel::VERBOSE)
        {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    }
}

pub fn is_enabled(cc: &'static str) -> bool {
    LOGGER_CONFIG.read().unwrap().cc_enabled(cc)
}

pub fn is_at_level(cc: &'static str, level: LogLevel) -> bool {
    LOGGER_CONFIG.read().unwrap().cc_at_level(cc, level)
}

pub fn disable_cc(cc: &'static str) {
    LOGGER_CONFIG.write().unwrap().disable_cc(cc);
}

pub fn enable_cc(cc: &'static str, level: LogLevel) {
    LOGGER_CONFIG.write().unwrap().enable_cc(cc, level);
}

pub fn set_global_logging(enabled: bool) {
    let mut config = LOGGER_CONFIG.write().unwrap();

    if enabled {
        config.enable_global_tracing();
    } else {
        config.disable_global_tracing();
    }
}

pub fn set_global_level(level: LogLevel) {
    LOGGER_CONFIG.write().unwrap().set_global_level(level);
}

pub struct LoggingConfig {
    global_tracing_enabled: bool,
    global_level: LogLevel,
    flags: HashMap<&'static str, (bool, LogLevel)>, // <component name, (tracing enabled, trace level)>
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_tracing_enabled: true,
            global_level: LogLevel::INFO,
            flags: Default::default(),
        }
    }
}

impl LoggingConfig {
    pub fn cc_enabled(&self, cc: &'static str) -> bool {
        if !self.global_tracing_enabled {
            return false;
        }

        self.flags.get(cc).unwrap_or(&(true, LogLevel::INFO)).0
    }

    pub fn cc_at_level(&self, cc: &str, level: LogLevel) -> bool {
        if self.global_level >= level {
            return true;
        }

        self.flags.get(cc).unwrap_or(&(true, LogLevel::INFO)).1 == level
    }

    pub fn enable_cc(&mut self, cc: &'static str, level: LogLevel) {
        self.flags.insert(cc, (true, level));
    }

    pub fn disable_cc(&mut self, cc: &'static str) {
        self.flags.insert(cc, (false, LogLevel::INFO));
    }

    pub fn enable_global_tracing(&mut self) {
        self.global_tracing_enabled = true;
    }

    pub fn disable_global_tracing(&mut self) {
        self.global_tracing_enabled = false;
    }

    pub fn set_global_level(&mut self, level: LogLevel) {
        self.global_level = level;
    }
}
