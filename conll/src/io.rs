//! CoNLL format reader.

use std::io;

use deptree::graph::Sentence;
use deptree::token::{Token, TokenBuilder, EMPTY_TOKEN};
use tracing::debug;

use crate::error::{ReadError, RecordError};

/// A trait for objects that can read CoNLL `Sentence`s
pub trait ReadSentence {
    /// Read a `Sentence` from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_sentence` may generate an error to indicate that
    /// the operation could not be completed. After a malformed record, the
    /// remainder of the offending sentence is discarded, so that the next
    /// call starts at the following sentence.
    fn read_sentence(&mut self) -> Result<Option<Sentence>, ReadError>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> Sentences<Self>
    where
        Self: Sized,
    {
        Sentences { reader: self }
    }
}

/// A reader for CoNLL sentences.
///
/// Sentences are separated by one or more blank lines. Every non-blank
/// line holds one token with the tab-separated fields
///
/// `ID FORM LEMMA CPOSTAG POSTAG FEATS HEAD DEPREL PHEAD PDEPREL`
///
/// of which the last two are optional and ignored. Lines starting with `#`
/// are comments and are skipped.
pub struct Reader<R> {
    read: R,
    line: usize,
    sentences: usize,
    ignore_multiword: bool,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            line: 0,
            sentences: 0,
            ignore_multiword: false,
        }
    }

    /// Skip multiword token ranges (`3-4`) and empty nodes (`3.1`).
    ///
    /// Without this option, such identifiers are malformed records.
    pub fn ignore_multiword(mut self, ignore: bool) -> Self {
        self.ignore_multiword = ignore;
        self
    }

    fn finish(&mut self, mut sentence: Sentence) -> Sentence {
        self.sentences += 1;
        sentence.set_ordinal(self.sentences);
        debug!(
            sentence = self.sentences,
            tokens = sentence.len(),
            line = sentence.line(),
            "read sentence"
        );
        sentence
    }

    /// Consume lines up to the end of the current sentence.
    fn skip_sentence(&mut self) -> Result<(), ReadError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.read.read_line(&mut line)? == 0 {
                return Ok(());
            }
            self.line += 1;

            if line.trim().is_empty() {
                return Ok(());
            }
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Sentence, ReadError>;
    type IntoIter = Sentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadSentence for Reader<R> {
    fn read_sentence(&mut self) -> Result<Option<Sentence>, ReadError> {
        let mut line = String::new();
        let mut sentence = Sentence::new();

        loop {
            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                if sentence.is_empty() {
                    return Ok(None);
                }

                return Ok(Some(self.finish(sentence)));
            }

            self.line += 1;

            // The blank line is a sentence separator. We want to be robust
            // in the case a CoNLL file is malformed and has two newlines as
            // a separator.
            if line.trim().is_empty() {
                if sentence.is_empty() {
                    continue;
                }

                return Ok(Some(self.finish(sentence)));
            }

            if line.starts_with('#') {
                continue;
            }

            match parse_token(line.trim(), sentence.len() + 1, self.ignore_multiword) {
                Ok(Some(token)) => {
                    if sentence.is_empty() {
                        sentence.set_line(self.line);
                    }
                    sentence.push(token);
                }
                Ok(None) => continue,
                Err(source) => {
                    self.sentences += 1;
                    let err = ReadError::MalformedRecord {
                        sentence: self.sentences,
                        line: self.line,
                        source,
                    };
                    self.skip_sentence()?;
                    return Err(err);
                }
            }
        }
    }
}

/// An iterator over the sentences in a `Reader`.
pub struct Sentences<R>
where
    R: ReadSentence,
{
    reader: R,
}

impl<R> Iterator for Sentences<R>
where
    R: ReadSentence,
{
    type Item = Result<Sentence, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_sentence() {
            Ok(None) => None,
            Ok(Some(sent)) => Some(Ok(sent)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse a single token record.
///
/// Returns `None` for multiword ranges and empty nodes when these are
/// ignored.
fn parse_token(
    line: &str,
    expected: usize,
    ignore_multiword: bool,
) -> Result<Option<Token>, RecordError> {
    let mut iter = line.split('\t');

    let id = parse_required_field(iter.next(), "ID")?;
    if ignore_multiword && id.contains(|c: char| c == '-' || c == '.') {
        return Ok(None);
    }

    let index = parse_int_field(id, "ID")?;
    if index != expected {
        return Err(RecordError::UnexpectedIndex {
            expected,
            found: index,
        });
    }

    let mut token = TokenBuilder::new(index, parse_required_field(iter.next(), "FORM")?);

    if let Some(lemma) = parse_string_field(iter.next(), "LEMMA")? {
        token = token.lemma(lemma);
    }

    if let Some(upos) = parse_string_field(iter.next(), "CPOSTAG")? {
        token = token.upos(upos);
    }

    if let Some(xpos) = parse_string_field(iter.next(), "POSTAG")? {
        token = token.xpos(xpos);
    }

    if let Some(features) = parse_string_field(iter.next(), "FEATS")? {
        token = token.features(features);
    }

    token = token.head(parse_int_field(
        parse_required_field(iter.next(), "HEAD")?,
        "HEAD",
    )?);

    if let Some(relation) = parse_string_field(iter.next(), "DEPREL")? {
        token = token.relation(relation);
    }

    // PHEAD and PDEPREL are not used.

    Ok(Some(token.into()))
}

fn parse_required_field<'a>(
    field: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    match field {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(RecordError::MissingField { field: name }),
    }
}

fn parse_string_field<'a>(
    field: Option<&'a str>,
    name: &'static str,
) -> Result<Option<&'a str>, RecordError> {
    let s = parse_required_field(field, name)?;
    if s == EMPTY_TOKEN {
        Ok(None)
    } else {
        Ok(Some(s))
    }
}

fn parse_int_field(field: &str, name: &'static str) -> Result<usize, RecordError> {
    field
        .parse::<usize>()
        .map_err(|_| RecordError::ParseIntField {
            field: name,
            value: field.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Cursor};

    use deptree::graph::Sentence;

    use super::{ReadSentence, Reader};
    use crate::error::{ReadError, RecordError};
    use crate::tests::{read_sentences, TEST_SENTENCES};

    static BASIC: &str = "testdata/basic.conll";

    static DOUBLE_NEWLINE: &str = "testdata/double-newline.conll";

    static COMMENTS: &str = "testdata/comments.conll";

    static MULTIWORD: &str = "testdata/multiword.conll";

    static TEN_FIVE: &str = "testdata/ten-five.conll";

    fn string_reader(s: &str) -> Box<dyn BufRead> {
        Box::new(Cursor::new(s.as_bytes().to_owned()))
    }

    fn test_parsing(correct: &[Sentence], fragment: &str) {
        let sentences = read_sentences(fragment);
        assert_eq!(correct, sentences.as_slice());
    }

    #[test]
    fn reader() {
        test_parsing(&*TEST_SENTENCES, BASIC);
    }

    #[test]
    fn reader_robust() {
        test_parsing(&*TEST_SENTENCES, DOUBLE_NEWLINE);
    }

    #[test]
    fn reader_skips_comments() {
        test_parsing(&*TEST_SENTENCES, COMMENTS);
    }

    #[test]
    fn reader_segments_sentences() {
        let sentences = read_sentences(TEN_FIVE);
        let sizes: Vec<_> = sentences.iter().map(Sentence::len).collect();
        assert_eq!(sizes, vec![10, 5]);
        assert_eq!(sentences[0].ordinal(), 1);
        assert_eq!(sentences[1].ordinal(), 2);
        assert_eq!(sentences[1].line(), Some(12));
    }

    #[test]
    fn reader_emits_sentence_without_trailing_blank_line() {
        let data = "1\tHello\t_\t_\t_\t_\t0\troot\n\n\n1\tWorld\t_\t_\t_\t_\t0\troot";
        let sentences: Vec<_> = Reader::new(string_reader(data))
            .sentences()
            .map(Result::unwrap)
            .collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].tokens()[0].form(), "World");
    }

    #[test]
    fn reader_handles_crlf() {
        let data = "1\tHello\thello\tINTJ\tUH\t_\t0\troot\t_\t_\r\n\r\n";
        let mut reader = Reader::new(string_reader(data));
        let sentence = reader.read_sentence().unwrap().unwrap();
        assert_eq!(sentence.tokens()[0].relation(), Some("root"));
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    fn reader_empty_input() {
        let mut reader = Reader::new(string_reader("\n\n\n"));
        assert!(reader.read_sentence().unwrap().is_none());
    }

    #[test]
    fn reader_rejects_multiword_by_default() {
        let mut reader = Reader::new(string_reader(
            "1\tIl\til\tPRON\t_\t_\t2\tnsubj\n2-3\tdu\t_\t_\t_\t_\t_\t_\n",
        ));
        match reader.read_sentence() {
            Err(ReadError::MalformedRecord {
                sentence: 1,
                line: 2,
                source: RecordError::ParseIntField { field: "ID", .. },
            }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reader_ignores_multiword() {
        let sentences: Vec<_> = Reader::new(string_reader(
            &std::fs::read_to_string(MULTIWORD).unwrap(),
        ))
        .ignore_multiword(true)
        .sentences()
        .map(Result::unwrap)
        .collect();
        assert_eq!(sentences.len(), 1);
        let forms: Vec<_> = sentences[0].iter().map(|t| t.form()).collect();
        assert_eq!(forms, vec!["Il", "mange", "de", "le", "pain", "."]);
    }

    #[test]
    #[should_panic(expected = "ParseIntField")]
    fn reader_rejects_non_numeric_id() {
        let mut reader = Reader::new(string_reader("test"));
        reader.read_sentence().unwrap();
    }

    #[test]
    #[should_panic(expected = "ParseIntField")]
    fn reader_rejects_non_numeric_head() {
        let mut reader = Reader::new(string_reader("1\ttest\t_\t_\t_\t_\troot\troot"));
        reader.read_sentence().unwrap();
    }

    #[test]
    #[should_panic(expected = "MissingField")]
    fn reader_rejects_short_record() {
        let mut reader = Reader::new(string_reader("1\ttest\t_\t_\t_\t_\t0"));
        reader.read_sentence().unwrap();
    }

    #[test]
    #[should_panic(expected = "UnexpectedIndex")]
    fn reader_rejects_index_gap() {
        let mut reader = Reader::new(string_reader(
            "1\ta\t_\t_\t_\t_\t0\troot\n3\tb\t_\t_\t_\t_\t1\tdep\n",
        ));
        reader.read_sentence().unwrap();
    }

    #[test]
    fn reader_resumes_after_malformed_record() {
        let data = "1\ta\t_\t_\t_\t_\tx\troot\n2\tb\t_\t_\t_\t_\t1\tdep\n\n\
                    1\tc\t_\t_\t_\t_\t0\troot\n";
        let mut sentences = Reader::new(string_reader(data)).sentences();

        let err = sentences.next().unwrap().unwrap_err();
        assert_eq!(err.sentence(), Some(1));

        let sentence = sentences.next().unwrap().unwrap();
        assert_eq!(sentence.ordinal(), 2);
        assert_eq!(sentence.len(), 1);
        assert_eq!(sentence.line(), Some(4));

        assert!(sentences.next().is_none());
    }
}
