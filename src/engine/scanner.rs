use std::cell::Cell;

/// `WhiteSpace` and `LineTerminator` as ECMAScript counts them.
pub(crate) fn is_js_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Finds the longest leading decimal literal of a raw input, in the manner of
/// JavaScript's `parseFloat`. Anything after the literal is ignored.
pub struct NumberScanner {
    index: Cell<usize>,
    source: Vec<char>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ScannedNumber {
    Finite {
        literal: String,
    },
    Infinity {
        negative: bool,
    },
    /// no numeric prefix.
    Nothing,
}

impl ScannedNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Finite { literal } => literal.parse().ok(),
            Self::Infinity { negative: false } => Some(f64::INFINITY),
            Self::Infinity { negative: true } => Some(f64::NEG_INFINITY),
            Self::Nothing => None,
        }
    }
}

impl NumberScanner {
    pub fn create(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            index: Cell::new(0),
        }
    }

    fn drain_space(&self) {
        while let Some(c) = self.current_char() {
            if !is_js_whitespace(c) {
                break
            }
            self.advance();
        }
    }

    pub fn scan(&self) -> ScannedNumber {
        self.drain_space();

        let mut buf = String::new();
        let mut negative = false;
        if let Some(sign @ ('+' | '-')) = self.current_char() {
            negative = sign == '-';
            buf.push(sign);
            self.advance();
        }

        if self.rest_starts_with("Infinity") {
            self.advance_by("Infinity".len());
            return ScannedNumber::Infinity { negative }
        }

        let integral_digits = self.scan_digits(&mut buf);
        let mut fraction_digits = 0;
        if self.current_char() == Some('.') {
            // "1." is complete on its own, but a lone "." is not.
            let checkpoint = self.index.get();
            buf.push('.');
            self.advance();
            fraction_digits = self.scan_digits(&mut buf);
            if integral_digits == 0 && fraction_digits == 0 {
                self.index.set(checkpoint);
                buf.pop();
            }
        }

        if integral_digits == 0 && fraction_digits == 0 {
            return ScannedNumber::Nothing
        }

        self.scan_exponent(&mut buf);

        ScannedNumber::Finite { literal: buf }
    }

    fn scan_digits(&self, buf: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.current_char() {
            if !c.is_ascii_digit() {
                break
            }
            buf.push(c);
            self.advance();
            count += 1;
        }
        count
    }

    /// consumes `e[+-]digits` only when at least one digit follows.
    fn scan_exponent(&self, buf: &mut String) {
        if !matches!(self.current_char(), Some('e' | 'E')) {
            return
        }
        let checkpoint = self.index.get();
        let mut exponent = String::from("e");
        self.advance();
        if let Some(sign @ ('+' | '-')) = self.current_char() {
            exponent.push(sign);
            self.advance();
        }
        if self.scan_digits(&mut exponent) == 0 {
            self.index.set(checkpoint);
            return
        }
        buf.push_str(&exponent);
    }

    fn rest_starts_with(&self, word: &str) -> bool {
        let start = self.index.get();
        word.chars()
            .enumerate()
            .all(|(offset, expected)| self.source.get(start + offset) == Some(&expected))
    }

    fn current_char(&self) -> Option<char> {
        self.source.get(self.index.get()).copied()
    }

    fn advance(&self) {
        self.advance_by(1);
    }

    fn advance_by(&self, step: usize) {
        self.index.set(self.index.get() + step);
    }
}
