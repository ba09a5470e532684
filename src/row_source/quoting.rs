// Strict quoting check over the raw bytes handed to the CSV reader
use std::io::{self, Read};

/// First malformed quoting found in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotingViolation {
    /// 1-based record number, counting a header record and skipping blank
    /// and comment lines the same way the reader does
    pub record: u64,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    LineStart,
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
    Escaped,
    Comment,
}

/// Passes bytes through unchanged while tracking field quoting.
///
/// The `csv` reader accepts an unterminated quoted field by running it to the
/// end of input, and treats a stray quote inside an unquoted field as data.
/// Both are reported here as the first violation seen.
pub struct QuoteChecked<R> {
    inner: R,
    delimiter: u8,
    quote: u8,
    escape: Option<u8>,
    double_quote: bool,
    comment: Option<u8>,
    state: State,
    record: u64,
    line_has_data: bool,
    violation: Option<QuotingViolation>,
}

impl<R: Read> QuoteChecked<R> {
    pub fn new(
        inner: R,
        delimiter: u8,
        quote: u8,
        escape: Option<u8>,
        double_quote: bool,
        comment: Option<u8>,
    ) -> Self {
        Self {
            inner,
            delimiter,
            quote,
            escape,
            double_quote,
            comment,
            state: State::LineStart,
            record: 1,
            line_has_data: false,
            violation: None,
        }
    }

    pub fn violation(&self) -> Option<&QuotingViolation> {
        self.violation.as_ref()
    }

    fn fail(&mut self, message: &'static str) {
        if self.violation.is_none() {
            self.violation = Some(QuotingViolation {
                record: self.record,
                message,
            });
        }
    }

    fn end_line(&mut self) {
        if self.line_has_data {
            self.record += 1;
        }
        self.line_has_data = false;
        self.state = State::LineStart;
    }

    fn scan(&mut self, byte: u8) {
        let is_terminator = byte == b'\n' || byte == b'\r';
        match self.state {
            State::Comment => {
                if byte == b'\n' {
                    self.state = State::LineStart;
                }
            }
            State::LineStart if Some(byte) == self.comment => self.state = State::Comment,
            State::LineStart | State::FieldStart => {
                if is_terminator {
                    self.end_line();
                } else {
                    self.line_has_data = true;
                    self.state = if byte == self.quote {
                        State::Quoted
                    } else if byte == self.delimiter {
                        State::FieldStart
                    } else {
                        State::Unquoted
                    };
                }
            }
            State::Unquoted => {
                if is_terminator {
                    self.end_line();
                } else if byte == self.delimiter {
                    self.state = State::FieldStart;
                } else if byte == self.quote {
                    self.fail("unexpected quote in unquoted field");
                }
            }
            State::Quoted => {
                if byte == self.quote {
                    self.state = State::QuoteInQuoted;
                } else if Some(byte) == self.escape {
                    self.state = State::Escaped;
                }
            }
            State::Escaped => self.state = State::Quoted,
            State::QuoteInQuoted => {
                if byte == self.quote && self.double_quote {
                    self.state = State::Quoted;
                } else if byte == self.delimiter {
                    self.state = State::FieldStart;
                } else if is_terminator {
                    self.end_line();
                } else {
                    self.fail("unexpected character after closing quote");
                    self.state = State::Unquoted;
                }
            }
        }
    }

    fn finish(&mut self) {
        if matches!(self.state, State::Quoted | State::Escaped) {
            self.fail("unclosed quoted field");
        }
    }
}

impl<R: Read> Read for QuoteChecked<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read == 0 && !buf.is_empty() {
            self.finish();
        }
        for &byte in &buf[..read] {
            self.scan(byte);
        }
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Option<QuotingViolation> {
        let mut reader = QuoteChecked::new(input.as_bytes(), b',', b'"', None, true, None);
        io::copy(&mut reader, &mut io::sink()).unwrap();
        reader.violation().cloned()
    }

    #[test]
    fn test_well_formed_input_passes() {
        assert_eq!(check("1,\"a,b\"\n2,\"say \"\"hi\"\"\"\r\n\n3,\"two\nlines\"\n4,"), None);
        assert_eq!(check(""), None);
    }

    #[test]
    fn test_unclosed_quote_reports_its_record() {
        let violation = check("0,ok\n1,\"abc\n2,def\n").unwrap();
        assert_eq!(violation.record, 2);
        assert_eq!(violation.message, "unclosed quoted field");
    }

    #[test]
    fn test_stray_quote_in_unquoted_field() {
        let violation = check("1,ab\"c\n").unwrap();
        assert_eq!(violation.record, 1);
        assert_eq!(violation.message, "unexpected quote in unquoted field");
    }

    #[test]
    fn test_text_after_closing_quote() {
        let violation = check("1,a\n\n2,\"b\"x\n").unwrap();
        assert_eq!(violation.record, 2);
        assert_eq!(violation.message, "unexpected character after closing quote");
    }

    #[test]
    fn test_escape_and_comment_lines() {
        let mut reader = QuoteChecked::new(
            "# a \"comment\n1,\"a\\\"b\"\n".as_bytes(),
            b',',
            b'"',
            Some(b'\\'),
            false,
            Some(b'#'),
        );
        io::copy(&mut reader, &mut io::sink()).unwrap();
        assert_eq!(reader.violation(), None);
    }
}
