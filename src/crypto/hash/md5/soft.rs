use super::{INITIAL_STATE, K64, SHIFTS};

/// Streaming MD5 hasher.
///
/// The whole working set lives inline, so a `Md5` can be copied to take a
/// digest of the data seen so far without disturbing the running state.
#[derive(Clone, Copy)]
pub struct Md5 {
    state: [u32; 4],
    buffer: [u8; Self::BLOCK_LEN],
    // total bytes fed, modulo 2^64
    len: u64,
    offset: usize,
}

impl Md5 {
    pub const BLOCK_LEN: usize = 64;
    pub const DIGEST_LEN: usize = 16;

    const MLEN_SIZE: usize = core::mem::size_of::<u64>();
    const MLEN_OFFSET: usize = Self::BLOCK_LEN - Self::MLEN_SIZE;
    const MAX_PAD_LEN: usize = Self::BLOCK_LEN + Self::MLEN_SIZE;

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0; Self::BLOCK_LEN],
            len: 0,
            offset: 0,
        }
    }

    #[inline]
    pub fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add(data.len() as u64);

        if self.offset > 0 {
            let take = (Self::BLOCK_LEN - self.offset).min(data.len());
            self.buffer[self.offset..self.offset + take].copy_from_slice(&data[..take]);
            self.offset += take;
            data = &data[take..];

            if self.offset < Self::BLOCK_LEN {
                return;
            }
            let block = self.buffer;
            compress(&mut self.state, &block);
            self.offset = 0;
        }

        let blocks = data.chunks_exact(Self::BLOCK_LEN);
        let remain = blocks.remainder();
        for block in blocks {
            compress(&mut self.state, block);
        }

        self.buffer[..remain.len()].copy_from_slice(remain);
        self.offset = remain.len();
    }

    #[inline]
    pub fn finalize(self) -> [u8; Self::DIGEST_LEN] {
        let mlen_bits = self.len.wrapping_mul(8);

        // 0x80, zeros up to byte 56 of the last block, then the bit length
        let plen = if self.offset < Self::MLEN_OFFSET {
            Self::MLEN_OFFSET - self.offset
        } else {
            Self::BLOCK_LEN + Self::MLEN_OFFSET - self.offset
        };

        let mut padding = [0u8; Self::MAX_PAD_LEN];
        padding[0] = 0x80;
        padding[plen..plen + Self::MLEN_SIZE].copy_from_slice(&mlen_bits.to_le_bytes());

        let mut md5 = self;
        md5.update(&padding[..plen + Self::MLEN_SIZE]);

        debug_assert_eq!(md5.offset, 0);

        let mut output = [0u8; Self::DIGEST_LEN];
        for (out, word) in output.chunks_exact_mut(4).zip(md5.state) {
            out.copy_from_slice(&word.to_le_bytes());
        }
        output
    }

    #[inline(always)]
    pub fn oneshot<T: AsRef<[u8]>>(data: T) -> [u8; Self::DIGEST_LEN] {
        let mut md5 = Self::new();
        md5.update(data.as_ref());
        md5.finalize()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Md5 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Md5")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// a' = b + ((a + mix + word + k) <<< s), all mod 2^32
#[inline(always)]
fn step(a: u32, b: u32, mix: u32, word: u32, k: u32, s: u32) -> u32 {
    a.wrapping_add(mix)
        .wrapping_add(word)
        .wrapping_add(k)
        .rotate_left(s)
        .wrapping_add(b)
}

#[inline(always)]
fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), Md5::BLOCK_LEN);

    let mut w = [0u32; 16];
    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    // round 1: words in order
    #[crate::loop_unroll(n, 0, 4)]
    fn loop_unroll() {
        let j = 4 * n;
        let s = SHIFTS[0];
        a = step(a, b, f(b, c, d), w[j], K64[j], s[0]);
        d = step(d, a, f(a, b, c), w[j + 1], K64[j + 1], s[1]);
        c = step(c, d, f(d, a, b), w[j + 2], K64[j + 2], s[2]);
        b = step(b, c, f(c, d, a), w[j + 3], K64[j + 3], s[3]);
    }

    // round 2: word (5j + 1) mod 16
    #[crate::loop_unroll(n, 0, 4)]
    fn loop_unroll() {
        let j = 4 * n;
        let s = SHIFTS[1];
        a = step(a, b, g(b, c, d), w[(5 * j + 1) % 16], K64[16 + j], s[0]);
        d = step(d, a, g(a, b, c), w[(5 * (j + 1) + 1) % 16], K64[16 + j + 1], s[1]);
        c = step(c, d, g(d, a, b), w[(5 * (j + 2) + 1) % 16], K64[16 + j + 2], s[2]);
        b = step(b, c, g(c, d, a), w[(5 * (j + 3) + 1) % 16], K64[16 + j + 3], s[3]);
    }

    // round 3: word (3j + 5) mod 16
    #[crate::loop_unroll(n, 0, 4)]
    fn loop_unroll() {
        let j = 4 * n;
        let s = SHIFTS[2];
        a = step(a, b, h(b, c, d), w[(3 * j + 5) % 16], K64[32 + j], s[0]);
        d = step(d, a, h(a, b, c), w[(3 * (j + 1) + 5) % 16], K64[32 + j + 1], s[1]);
        c = step(c, d, h(d, a, b), w[(3 * (j + 2) + 5) % 16], K64[32 + j + 2], s[2]);
        b = step(b, c, h(c, d, a), w[(3 * (j + 3) + 5) % 16], K64[32 + j + 3], s[3]);
    }

    // round 4: word 7j mod 16
    #[crate::loop_unroll(n, 0, 4)]
    fn loop_unroll() {
        let j = 4 * n;
        let s = SHIFTS[3];
        a = step(a, b, i(b, c, d), w[(7 * j) % 16], K64[48 + j], s[0]);
        d = step(d, a, i(a, b, c), w[(7 * (j + 1)) % 16], K64[48 + j + 1], s[1]);
        c = step(c, d, i(d, a, b), w[(7 * (j + 2)) % 16], K64[48 + j + 2], s[2]);
        b = step(b, c, i(c, d, a), w[(7 * (j + 3)) % 16], K64[48 + j + 3], s[3]);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}
