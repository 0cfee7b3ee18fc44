// Phrase lists backing the style rules. Matching is ASCII case-insensitive
// and restricted to whole words.

pub const WEASEL_WORDS: &[&str] = &[
    "many", "various", "very", "fairly", "several", "extremely", "exceedingly", "quite",
    "remarkably", "few", "surprisingly", "mostly", "largely", "huge", "tiny", "is a number",
    "are a number", "excellent", "interestingly", "significantly", "substantially", "clearly",
    "vast", "relatively", "completely",
];

pub const ADVERBS: &[&str] = &[
    "absolutely", "accidentally", "actually", "additionally", "allegedly", "angrily",
    "anxiously", "approximately", "awkwardly", "badly", "barely", "basically", "beautifully",
    "blindly", "boldly", "bravely", "brightly", "briskly", "busily", "calmly", "carefully",
    "carelessly", "cautiously", "certainly", "cheerfully", "closely", "correctly",
    "courageously", "cruelly", "definitely", "deliberately", "doubtfully", "eagerly", "easily",
    "elegantly", "enormously", "enthusiastically", "equally", "essentially", "eventually",
    "exactly", "faithfully", "finally", "foolishly", "fortunately", "frankly", "frantically",
    "generously", "gently", "gladly", "gracefully", "greedily", "happily", "hastily", "honestly",
    "hopefully", "hopelessly", "hungrily", "innocently", "instantly", "intensely", "intently",
    "joyfully", "justly", "kindly", "knowingly", "lazily", "literally", "loosely", "loudly",
    "madly", "merrily", "mysteriously", "nearly", "neatly", "nervously", "noisily", "obviously",
    "openly", "painfully", "patiently", "perfectly", "politely", "poorly", "powerfully",
    "presumably", "previously", "probably", "promptly", "quickly", "quietly", "rapidly",
    "rarely", "really", "recklessly", "regularly", "reluctantly", "repeatedly", "roughly",
    "rudely", "sadly", "safely", "seriously", "sharply", "shyly", "silently", "simply",
    "slowly", "smoothly", "softly", "solemnly", "speedily", "sternly", "strictly", "suddenly",
    "supposedly", "suspiciously", "sweetly", "swiftly", "tenderly", "tensely", "terribly",
    "thankfully", "thoroughly", "thoughtfully", "tightly", "totally", "tremendously", "truly",
    "truthfully", "ultimately", "unexpectedly", "unfortunately", "usually", "utterly",
    "vaguely", "violently", "virtually", "warmly", "weakly", "wearily", "wildly", "wisely",
    "wrongly",
];

pub const WORDY_PHRASES: &[&str] = &[
    "a number of", "abundance", "accede to", "accelerate", "accentuate", "accompany",
    "accomplish", "accorded", "accrue", "acquiesce", "acquire", "additional", "adjacent to",
    "adjustment", "admissible", "advantageous", "adversely impact", "advise", "aforementioned",
    "aggregate", "all of", "all things considered", "alleviate", "allocate",
    "along the lines of", "already existing", "ameliorate", "anticipate", "apparent",
    "appreciable", "as a matter of fact", "as a means of", "as far as i'm concerned",
    "as of yet", "as to", "as yet", "ascertain", "assistance", "at the present time",
    "at this time", "attain", "attributable to", "authorize", "because of the fact that",
    "belated", "benefit from", "bestow", "by means of", "by virtue of", "capability", "cease",
    "close proximity", "commence", "comply with", "concerning", "consequently", "consolidate",
    "constitutes", "demonstrate", "depart", "designate", "discontinue", "due to the fact that",
    "each and every", "economical", "eliminate", "elucidate", "employ", "endeavor", "enumerate",
    "equitable", "equivalent", "evaluate", "evidenced", "exclusively", "expedite", "expend",
    "expiration", "facilitate", "factual evidence", "feasible", "finalize",
    "first and foremost", "for the purpose of", "forfeit", "formulate", "have a tendency to",
    "honest truth", "however", "if and when", "impacted", "implement",
    "in a manner of speaking", "in a timely manner", "in a very real sense",
    "in accordance with", "in addition", "in all likelihood", "in an effort to", "in between",
    "in excess of", "in lieu of", "in light of the fact that", "in many cases", "in order to",
    "in regard to", "in some instances", "in terms of", "in the near future",
    "in the process of", "inception", "incumbent upon", "indicate", "indication", "initiate",
    "is applicable to", "is authorized to", "is responsible for", "it is essential",
    "magnitude", "maximum", "methodology", "minimize", "minimum", "modify", "monitor",
    "multiple", "necessitate", "nevertheless", "not certain", "not many", "not often",
    "not unless", "not unlike", "notwithstanding", "null and void", "numerous", "objective",
    "obligate", "obtain", "on the contrary", "on the other hand", "one particular", "optimum",
    "overall", "owing to the fact that", "participate", "particulars", "pass away",
    "pertaining to", "point in time", "portion", "possess", "preclude", "prior to",
    "prioritize", "procure", "proficiency", "provided that", "purchase", "put simply",
    "readily apparent", "refer back", "regarding", "relocate", "remainder", "remuneration",
    "require", "requirement", "reside", "residence", "retain", "satisfy", "shall",
    "should you wish", "similar to", "solicit", "span across", "strategize", "subsequent",
    "substantial", "successfully complete", "sufficient", "terminate", "the month of",
    "the point i am trying to make", "therefore", "time period", "took advantage of",
    "transmit", "transpire", "type of", "until such time as", "utilization", "utilize",
    "validate", "various different", "what i mean to say is", "whether or not",
    "with respect to", "with the exception of", "witnessed",
];

pub const CLICHES: &[&str] = &[
    "a chip off the old block", "a clean slate", "a dark and stormy night", "a far cry",
    "a fine kettle of fish", "a loose cannon", "a penny saved is a penny earned",
    "a tough row to hoe", "a word to the wise", "ace in the hole", "acid test",
    "add insult to injury", "against all odds", "air your dirty laundry",
    "all fun and games", "all in a day's work", "all talk, no action", "all thumbs",
    "all your eggs in one basket", "all's fair in love and war",
    "all's well that ends well", "almighty dollar", "an axe to grind",
    "another day, another dollar", "armed to the teeth", "as luck would have it",
    "as old as time", "as the crow flies", "at loose ends", "at my wits end",
    "at the end of the day", "avoid like the plague", "back against the wall",
    "back in the saddle", "back to square one", "back to the drawing board",
    "ballpark figure", "baptism by fire", "barking up the wrong tree", "beat a dead horse",
    "beat around the bush", "been there, done that", "beggars can't be choosers",
    "behind the eight ball", "bend over backwards", "benefit of the doubt",
    "bent out of shape", "best thing since sliced bread", "bet your bottom dollar",
    "better late than never", "better safe than sorry", "between a rock and a hard place",
    "beyond the pale", "bide your time", "big fish in a small pond",
    "bite off more than you can chew", "bite the bullet", "bite the dust", "bitter end",
    "blessing in disguise", "blood is thicker than water", "blow off steam", "bottom line",
    "break the ice", "bright and early", "bring home the bacon", "burn the midnight oil",
    "by the skin of your teeth", "call it a day", "calm before the storm",
    "cut to the chase", "dead as a doornail", "easier said than done",
    "every cloud has a silver lining", "few and far between", "fit as a fiddle",
    "go the extra mile", "hit the nail on the head", "in the nick of time",
    "it goes without saying", "last but not least", "low hanging fruit",
    "needle in a haystack", "par for the course", "piece of cake", "think outside the box",
    "time will tell", "tip of the iceberg", "under the weather", "when all is said and done",
    "win-win situation",
];

pub const TO_BE: &[&str] = &[
    "am", "are", "aren't", "be", "been", "being", "he's", "here's", "i'm", "is", "isn't",
    "it's", "she's", "that's", "there's", "they're", "was", "wasn't", "we're", "were",
    "weren't", "what's", "where's", "who's", "you're",
];

pub const IRREGULAR_PARTICIPLES: &[&str] = &[
    "awoken", "been", "born", "beat", "become", "begun", "bent", "beset", "bet", "bid",
    "bidden", "bound", "bitten", "bled", "blown", "broken", "bred", "brought", "broadcast",
    "built", "burnt", "burst", "bought", "cast", "caught", "chosen", "clung", "come", "cost",
    "crept", "cut", "dealt", "dug", "dived", "done", "drawn", "dreamt", "driven", "drunk",
    "eaten", "fallen", "fed", "felt", "fought", "found", "fit", "fled", "flung", "flown",
    "forbidden", "forecast", "foregone", "foreseen", "foretold", "forgiven", "forgotten",
    "forsaken", "frozen", "gotten", "given", "gone", "ground", "grown", "hung", "heard",
    "hidden", "hit", "held", "hurt", "kept", "knelt", "knit", "known", "laid", "led", "leapt",
    "learnt", "left", "lent", "let", "lain", "lighted", "lost", "made", "meant", "met",
    "misspelt", "mistaken", "mown", "overcome", "overdone", "overtaken", "overthrown", "paid",
    "pled", "proven", "put", "quit", "read", "rid", "ridden", "rung", "risen", "run", "sawn",
    "said", "seen", "sought", "sold", "sent", "set", "sewn", "shaken", "shaven", "shorn",
    "shed", "shone", "shod", "shot", "shown", "shrunk", "shut", "sung", "sunk", "sat", "slept",
    "slain", "slid", "slung", "slit", "smitten", "sown", "spoken", "sped", "spent", "spilt",
    "spun", "spit", "split", "spread", "sprung", "stood", "stolen", "stuck", "stung", "stunk",
    "stridden", "struck", "strung", "striven", "sworn", "swept", "swollen", "swum", "swung",
    "taken", "taught", "torn", "told", "thought", "thrived", "thrown", "thrust", "trodden",
    "understood", "upheld", "upset", "woken", "worn", "woven", "wed", "wept", "wound", "won",
    "withheld", "withstood", "wrung", "written",
];

/// Words after which a bare verb is grammatical ("does he go")
pub const AUXILIARIES: &[&str] = &[
    "do", "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might",
    "must", "let", "make", "made", "help", "to", "watch", "saw", "see", "hear", "heard",
];
