// Levenshtein edit distance and its length-normalized ratio

/// Default admission threshold for fuzzy matches.
pub const MAX_NORMALIZED_DISTANCE: f32 = 0.3;

/// Unit-cost Levenshtein distance between two words.
///
/// Insertions, deletions and substitutions cost 1; matches cost 0. Uses the
/// full `(len1 + 1) x (len2 + 1)` table, which is fine for word-sized input.
pub fn levenshtein(word1: &str, word2: &str) -> usize {
    let a: Vec<char> = word1.chars().collect();
    let b: Vec<char> = word2.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            matrix[i][j] = if a[i - 1] == b[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + matrix[i - 1][j]
                    .min(matrix[i][j - 1])
                    .min(matrix[i - 1][j - 1])
            };
        }
    }

    matrix[a.len()][b.len()]
}

/// Levenshtein distance divided by the average length of the two words.
///
/// Two empty words have ratio 0.
pub fn normalized_distance(word1: &str, word2: &str) -> f32 {
    let len1 = word1.chars().count();
    let len2 = word2.chars().count();
    normalize(levenshtein(word1, word2), len1, len2)
}

/// Divide a raw `distance` between words of `len1` and `len2` characters by
/// their average length.
///
/// Monotone in `distance`, so a lower bound on the edit distance yields a
/// lower bound on the ratio.
pub fn normalize(distance: usize, len1: usize, len2: usize) -> f32 {
    if len1 + len2 == 0 {
        return 0.0;
    }
    let average_len = (len1 + len2) as f32 / 2.0;
    distance as f32 / average_len
}
