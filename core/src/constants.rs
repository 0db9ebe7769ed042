/// AES block size in bytes (all KEF modes use AES-256).
pub const AES_BLOCK_SIZE: usize = 16;

/// Derived KEF key length (PBKDF2-HMAC-SHA256 output).
pub const KEY_LEN_32: usize = 32;

/// IV lengths per cipher mode.
pub mod iv_lens {
    pub const ECB: usize = 0;
    pub const CBC: usize = 16;
    pub const GCM: usize = 12;
}

/// KEF envelope limits.
pub mod kef_limits {
    /// Longest id accepted when wrapping (one length byte, reserved headroom above).
    pub const MAX_ID_LEN: usize = 252;
    /// Iteration counts that are multiples of this are stored as a quotient.
    pub const ITERATION_UNIT: u32 = 10_000;
    /// Largest quotient accepted for packed iterations.
    pub const MAX_PACKED_QUOTIENT: u32 = 10_000;
    /// Iterations are stored as a u24.
    pub const MAX_RAW_ITERATIONS: u32 = (1 << 24) - 1;
}

/// Plaintext size classes used by the version heuristic.
pub const SMALL_PLAINTEXT: usize = 32;
pub const BIG_PLAINTEXT: usize = 160;

/// Above this size BBQR always compresses, skipping the size comparison.
pub const BBQR_ALWAYS_COMPRESS: usize = 5000;

/// Decompressed output bound for hostile inputs (1 MiB).
pub const MAX_INFLATE_LEN: usize = 1024 * 1024;

/// Byte-mode capacity per QR version 1..=20, error correction level L.
pub const QR_CAPACITY_BYTES: [usize; 20] = [
    17, 32, 53, 78, 106, 134, 154, 192, 230, 271,
    321, 367, 425, 458, 520, 586, 644, 718, 792, 858,
];

/// Alphanumeric-mode capacity per QR version 1..=20, error correction level L.
pub const QR_CAPACITY_ALNUM: [usize; 20] = [
    25, 47, 77, 114, 154, 195, 224, 279, 335, 395,
    468, 535, 619, 667, 758, 854, 938, 1046, 1153, 1249,
];

/// Modules reserved for the quiet frame when converting width to a QR version.
pub const QR_FRAME_MODULES: usize = 2;

/// PMOFN header allowances: `pXofY ` and `pXXofYY `.
pub const PMOFN_PREFIX_1D: usize = 6;
pub const PMOFN_PREFIX_2D: usize = 8;
/// Largest PMOFN total accepted on either side of the transport.
pub const PMOFN_MAX_PARTS: usize = 9999;

/// BBQR fixed header: `B$` + encoding + file type + total(2) + index(2).
pub const BBQR_HEADER_LEN: usize = 8;
/// Largest value representable by two base36 digits.
pub const BBQR_MAX_PARTS: usize = 36 * 36 - 1;
