//! Live character counter for textareas with a `maxlength`

/// Visual level of the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    /// At or above 90% of the limit
    Warning,
    /// At or above the limit; still carries the warning class
    Error,
}

impl CounterLevel {
    /// CSS classes applied to the counter element
    pub fn css_classes(self) -> &'static [&'static str] {
        match self {
            CounterLevel::Normal => &[],
            CounterLevel::Warning => &["warning"],
            CounterLevel::Error => &["warning", "error"],
        }
    }
}

/// What the counter element shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDisplay {
    pub text: String,
    pub level: CounterLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    max: usize,
}

impl CharCounter {
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    /// Length as the browser counts it for `maxlength` (UTF-16 units)
    pub fn length_of(value: &str) -> usize {
        value.encode_utf16().count()
    }

    pub fn level(&self, len: usize) -> CounterLevel {
        if len >= self.max {
            CounterLevel::Error
        } else if len * 10 >= self.max * 9 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    pub fn display(&self, value: &str) -> CounterDisplay {
        let len = Self::length_of(value);
        CounterDisplay {
            text: format!("{}/{}", len, self.max),
            level: self.level(len),
        }
    }
}
