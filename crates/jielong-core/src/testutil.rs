//! Shared fixtures for unit tests.

use crate::dict::{Dictionary, IdiomEntry};
use crate::matcher::{MatchMode, Matcher, Ranking};

/// Small hand-checked dataset. `意想不到` deliberately precedes the other
/// `意` idioms so that ranking policies produce different orders.
pub(crate) const SAMPLE_TSV: &str = "\
# sample
意想不到\tyi'xiang'bu'dao\t没有想到，出乎意料。
一心一意\tyi'xin'yi'yi\t形容做事专心，意志专一。
意气风发\tyi'qi'feng'fa\t形容精神振奋，气概豪迈。
意味深长\tyi'wei'shen'chang\t意思含蓄深远，耐人寻味。
义不容辞\tyi'bu'rong'ci\t道义上不允许推辞。
一语破的\tyi'yu'po'di\t一句话就说中要害。
发扬光大\tfa'yang'guang'da\t使好的作风、传统等得到发展和提高。
发人深省\tfa'ren'shen'xing\t启发人深刻思考，有所醒悟。
大公无私\tda'gong'wu'si\t从集体利益出发，毫无自私自利之心。
长驱直入\tchang'qu'zhi'ru\t长距离不停顿地快速向前挺进。
道听途说\tdao'ting'tu'shuo\t没有根据的传闻。
说一不二\tshuo'yi'bu'er\t形容说话算数。
二话不说\ter'hua'bu'shuo\t不说别的话，指立即行动。
精益求精\tjing'yi'qiu'jing\t已经很好了，还要求更好。
龙飞凤舞\t形容书法笔势有力，灵活舒展。
";

/// The dataset shipped in `data/idioms.tsv`.
pub(crate) const BUNDLED_TSV: &str = include_str!("../../../data/idioms.tsv");

pub(crate) fn sample_dict() -> Dictionary {
    Dictionary::from_text(SAMPLE_TSV).unwrap()
}

pub(crate) fn bundled_dict() -> Dictionary {
    Dictionary::from_text(BUNDLED_TSV).unwrap()
}

pub(crate) fn sample_matcher(mode: MatchMode, ranking: Ranking) -> Matcher {
    Matcher::with_options(sample_dict(), mode, ranking)
}

pub(crate) fn texts<'a>(entries: impl IntoIterator<Item = &'a IdiomEntry>) -> Vec<&'a str> {
    entries.into_iter().map(|e| e.text.as_str()).collect()
}
