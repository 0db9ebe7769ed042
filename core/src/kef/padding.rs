use crate::constants::AES_BLOCK_SIZE;
use crate::kef::types::Padding;

pub fn pad(mut data: Vec<u8>, padding: Padding) -> Vec<u8> {
    let missing = (AES_BLOCK_SIZE - data.len() % AES_BLOCK_SIZE) % AES_BLOCK_SIZE;
    match padding {
        Padding::None => {}
        Padding::Nul => data.resize(data.len() + missing, 0),
        Padding::Pkcs7 => {
            let n = if missing == 0 { AES_BLOCK_SIZE } else { missing };
            data.resize(data.len() + n, n as u8);
        }
    }
    data
}

/// Strip padding. A PKCS#7 length byte outside 1..=16 (wrong key, tampering)
/// strips everything so the following authentication check fails.
pub fn unpad(mut data: Vec<u8>, padding: Padding) -> Vec<u8> {
    match padding {
        Padding::None => {}
        Padding::Nul => {
            let keep = data.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
            data.truncate(keep);
        }
        Padding::Pkcs7 => {
            let n = data.last().copied().unwrap_or(0) as usize;
            if (1..=AES_BLOCK_SIZE).contains(&n) && n <= data.len() {
                data.truncate(data.len() - n);
            } else {
                data.clear();
            }
        }
    }
    data
}
