//! Deterministic test keys
//!
//! 1024-bit RSA and 1024/160 DSA keys generated with OpenSSL, plus signatures OpenSSL
//! produced over [`INTEROP_MESSAGE`]. The `_ALT` keys are a second, unrelated RSA key
//! and a second DSA key over the same domain parameters.
//!
//! Available to other crates with the `test-fixtures` feature.

#![allow(dead_code)]

// `super`: tests/common/mod.rs includes this file next to `sig_engine::keys`
use super::keys::{
    DsaPrivateParameters, DsaPublicParameters, Key, RsaPrivateParameters, RsaPublicParameters,
};

const RSA_N: &str = concat!(
    "ac1609720e01083659b327cbed6e29348e678a279ce2b4fc6ed5c5feab07941c",
    "733f53b72f6bd0555a8defdfc648b187f53cc495735ee0df69207c0a42bdd48f",
    "67f1ffbfdc56da63b58a37baae5bfc7cb82753f441f5b8e20051e219772b8ba4",
    "a61d51ccf12d44e1986a4ab740ccdd565dd59a5ac65e0e00518aec4f6ad37ac7",
);
const RSA_E: &str = "010001";
const RSA_D: &str = concat!(
    "405394804fffcec4124fc80690e06702c060afe212e123ea60bc046128299311",
    "f77aaa9e855975ed120690ae437e94ee4f9bc198642209493a10ec8d2159b884",
    "adbd0915efd9d4ce07db54f9c55e8b32ac9f2cb0507b253f29d3f5691312f430",
    "d772df16ff446b09adbc3f4025043da37f870d9391dd9bebf32763cebf80d1f1",
);
const RSA_P: &str = concat!(
    "d9ea7d0e903f887452066470997174cc8bb08eb78412d415e949eda3429c1d6d",
    "32dc8ec910bb0bf92522cc32272642aaad97ca2fb05a6d77f499e323687fea13",
);
const RSA_Q: &str = concat!(
    "ca292124c76c251b5574c4d61066052d8d7b55734713cd42cf4aacb3cffda464",
    "0316647cc1b5796742eb10cae6fc694ef1c6eca08c45e6f2c083b31b0bb702fd",
);

const RSA_ALT_N: &str = concat!(
    "c2825bfc6cd4974942e01e7ffe4eaebc986eafe98ee687df0fd44c0dd3ed6fe5",
    "d148ad9719d9b4c9857fcc61e27a52c8da1318991f6e0706be7429b6defea17b",
    "5c51ec682b457538dfee3de52ea8955e3a87d42d7c3ba8131fa3d8995086f001",
    "e180cc06724546e0606ec139bb73909de725aa5daadb3e2646168ccf76d778f1",
);
const RSA_ALT_E: &str = "010001";
const RSA_ALT_D: &str = concat!(
    "ae939c05fa93f05903d9ede609150bc61fb630d31abc1435039b12cbd26ba864",
    "07ac0889b6dcec63771b961040da7354ec4df964ed8dae66c227b68cf8a667bd",
    "a3f254226a8c69a02c62fb01298d96533687190479fd90410c32d11efc2f6655",
    "8d705ca1df843d3e7ab834745098ca5319f5956ac06b86162b2f50b5bd960931",
);
const RSA_ALT_P: &str = concat!(
    "f191c4d67f0c724800e47ad697a7aec9671dc20789911491e15158f7c54d2e7c",
    "8eb6b1abfa694cd3e7b04aa70affdbb47c0c41d2461428bcbff1eb819198e7cd",
);
const RSA_ALT_Q: &str = concat!(
    "ce20ea9893a232e0b093eef84de22ddcc269d0eb64c0015b12a2b65b360f7231",
    "957dd02a3c92c3eadd3de1a38ee0f5c1684f9530128ab9ad9aa4e5f13fcae9b5",
);

const DSA_P: &str = concat!(
    "c1ecaeb3127344b524c0655059f4b37553b960b26bbff43a42b405268ba89fb9",
    "f0ffb885cbf284ef0fa05c572d4a9c8097781840739a52430afaf1f466611230",
    "3fc1e757347fe2fd6f0bada2fc10cf7201439958b20c754a8c5e449d92bcb05c",
    "bbb4dfd31c0936cdb77c14fa36109225859afb057c7464ccdc983bece465af53",
);
const DSA_Q: &str = "8b38a9496879a53c845b6b4f9cdffaad57b65d43";
const DSA_G: &str = concat!(
    "15cc641440ab38a4c016f2cfc81810aac7192e6263f546b9b31925b7bbaa8773",
    "b8afa052123ecb20472c175429957d8c7a368b3c3aea5e3809a6ed4be0d36e5a",
    "57c182d7d2edb5ac5a7a2a37d4e4b47f54cdeee207d4baced3c679b9eb9908ea",
    "ca71a832abd126a423f95c6cd499b1d92ae3e9a57011be7e82d2c0b5e31d18b4",
);
const DSA_Y: &str = concat!(
    "3e5dc85d39138e569983294735359305187bcd30c3b39a4a6e7ccc686e0c62ab",
    "e240cf7a795ed7b04e9050b35cf02f653210906516814ed012d6b04e47613b01",
    "e4ab43d7d1e6bba377f87f8f3c49c0f59b5a1a6823b18b380eeabc7722416c3d",
    "7333f48c38fd814b2f42a9922c06550d8d01aebe55fa33460e8fff8ee9c4c6b2",
);
const DSA_X: &str = "7fa068bda0b7b2d35dfab6e1cadd80967bf52bc7";

const DSA_ALT_Y: &str = concat!(
    "1ebf87197429e8d6a2e40e8e4008802c63e6c42f3e324b94cde5c8cabee86783",
    "b26c5534957408b448ec134b8263dea07a1183f5899662f398e35a06d77656af",
    "97798065cd171f8ae3bdefda8490cf158da80a82e8d304660b0b0c1ad222a195",
    "4a171344699d84238b34497add38c86a9a6c387f6f03b0dcb5041e9aae9193b9",
);
const DSA_ALT_X: &str = "301e315343e4824c7e071026b2b90199e9d4cb42";

/// Message signed by OpenSSL for the interop vectors
pub const INTEROP_MESSAGE: &[u8] = b"interop test message";

/// `openssl dgst -sha1 -sign rsa.pem` over [`INTEROP_MESSAGE`]
pub const OPENSSL_RSA_SIGNATURE: &str = concat!(
    "0e289682d2cb16eb3b34a6ec9c48a1007f1b8c4d31ba6e2c3dc54133767d8b2a",
    "46ecc080e5ca261c36452e310091c4f2377a5a14cd19b1f94994f1778a69cec5",
    "d6a28f816592acee0a1bc2a32b21ca015f389f2b2285d39e29ac8bd0886a874a",
    "c20353ac464cc26e1ff7d88ef1205cd5f48d7408597601a8c2e8cc2408a28f8e",
);

/// `openssl dgst -sha1 -sign dsa.pem` over [`INTEROP_MESSAGE`], DER converted to `r || s`
pub const OPENSSL_DSA_SIGNATURE: &str = concat!(
    "29eb6e4674af941db87b061afc9885ddf1050bbb",
    "1dc3074ced7d9c3dc52dab35a0d197e4f0d53b9b",
);

fn unhex(value: &str) -> Vec<u8> {
    hex::decode(value).expect("fixture hex is valid")
}

fn rsa_params(n: &str, e: &str, d: &str, p: &str, q: &str) -> RsaPrivateParameters {
    RsaPrivateParameters {
        modulus: unhex(n),
        public_exponent: unhex(e),
        private_exponent: unhex(d),
        prime1: unhex(p),
        prime2: unhex(q),
    }
}

fn dsa_params(y: &str, x: &str) -> DsaPrivateParameters {
    DsaPrivateParameters {
        p: unhex(DSA_P),
        q: unhex(DSA_Q),
        g: unhex(DSA_G),
        y: unhex(y),
        x: unhex(x),
    }
}

pub fn rsa_private_params() -> RsaPrivateParameters {
    rsa_params(RSA_N, RSA_E, RSA_D, RSA_P, RSA_Q)
}

pub fn rsa_public_params() -> RsaPublicParameters {
    rsa_private_params().public_parameters()
}

pub fn rsa_private_key() -> Key {
    Key::RsaPrivate(rsa_private_params())
}

pub fn rsa_public_key() -> Key {
    Key::RsaPublic(rsa_public_params())
}

pub fn rsa_alt_private_key() -> Key {
    Key::RsaPrivate(rsa_params(RSA_ALT_N, RSA_ALT_E, RSA_ALT_D, RSA_ALT_P, RSA_ALT_Q))
}

pub fn rsa_alt_public_key() -> Key {
    rsa_alt_private_key().public_key()
}

pub fn dsa_private_params() -> DsaPrivateParameters {
    dsa_params(DSA_Y, DSA_X)
}

pub fn dsa_public_params() -> DsaPublicParameters {
    dsa_private_params().public_parameters()
}

pub fn dsa_private_key() -> Key {
    Key::DsaPrivate(dsa_private_params())
}

pub fn dsa_public_key() -> Key {
    Key::DsaPublic(dsa_public_params())
}

pub fn dsa_alt_private_key() -> Key {
    Key::DsaPrivate(dsa_params(DSA_ALT_Y, DSA_ALT_X))
}

pub fn dsa_alt_public_key() -> Key {
    dsa_alt_private_key().public_key()
}

pub fn openssl_rsa_signature() -> Vec<u8> {
    unhex(OPENSSL_RSA_SIGNATURE)
}

pub fn openssl_dsa_signature() -> Vec<u8> {
    unhex(OPENSSL_DSA_SIGNATURE)
}
