use std::fs::File;
use std::io::BufReader;

use deptree::graph::Sentence;
use deptree::token::{Token, TokenBuilder};
use lazy_static::lazy_static;

use crate::io::{ReadSentence, Reader};

lazy_static! {
    pub static ref TEST_SENTENCES: Vec<Sentence> = {
        let mut sentences = Vec::new();

        let mut s1 = Sentence::new();
        s1.set_ordinal(1);
        s1.push(
            TokenBuilder::new(1, "Die")
                .lemma("die")
                .upos("ART")
                .xpos("ART")
                .features("case=nominative|gender=feminine|number=singular")
                .head(2)
                .relation("DET")
                .into(),
        );
        s1.push(
            TokenBuilder::new(2, "Großaufnahme")
                .lemma("Großaufnahme")
                .upos("N")
                .xpos("NN")
                .features("case=nominative|gender=feminine|number=singular")
                .head(0)
                .relation("ROOT")
                .into(),
        );
        sentences.push(s1);

        let mut s2: Sentence = vec![
            Token::from(
                TokenBuilder::new(1, "Gilles")
                    .lemma("Gilles")
                    .upos("N")
                    .xpos("NE")
                    .features("case=nominative|gender=masculine|number=singular")
                    .head(0)
                    .relation("ROOT"),
            ),
            Token::from(
                TokenBuilder::new(2, "Deleuze")
                    .lemma("Deleuze")
                    .upos("N")
                    .xpos("NE")
                    .features("case=nominative|gender=masculine|number=singular")
                    .head(1)
                    .relation("APP"),
            ),
        ]
        .into_iter()
        .collect();
        s2.set_ordinal(2);
        sentences.push(s2);

        sentences
    };
}

pub fn read_sentences(filename: &str) -> Vec<Sentence> {
    Reader::new(BufReader::new(File::open(filename).unwrap()))
        .sentences()
        .map(|s| s.unwrap())
        .collect()
}
