//! Fixed group parameters
//!
//! Two parameter sets ship with the library: the standard 4096-bit
//! production group and a 16-bit test group. Production `Q` is
//! 2^256 - 189. Production `P` follows the standard construction: its
//! high 256 bits and low 128 bits are all ones, the middle 3712 bits open
//! with the binary expansion of ln 2, and the tail of the middle is
//! adjusted by the least amount that makes `P` prime with `Q` dividing
//! `P - 1`. The generator is `G = 2^R mod P` for the cofactor
//! `R = (P - 1) / Q`, which gives `G` order `Q`. The primality and
//! subgroup structure are self-checked by the tests at the bottom of this
//! file.

/// Production prime modulus P (4096 bits), base64 big-endian.
pub(crate) const PRODUCTION_P_B64: &str = "//////////////////////////////////////////+xchf30c95q8njs5gD8vavQPNDJnKYti2KDRdbi6r6K+e4diBt66yYVZVS+0r6GxDtLq41wTghRCdXOykRabglPpbKFiJK6MUay9oRMXw4frnqm8OxNmA7JW+g7HZX90tyzoexnWVIyvXfpr04MDJIZV+hhy8g46LaLZfFDz/Vxgf0yhH7W/uQYQ0w+I/lUaLuVp1t/B76FX0uI94UALOWF0YHdduJkOXJQ+cytHnNM8zMTmWTk1FMTBoeC9HWCV0lZpszNWSjN2qcf4peFI6CB022AVz+eqMMSApUFzUNLJVdUXmx4XudrjE822xgbLEHj3NdGy2zG19QtRhQZMGLTRYts7NlhT11mKGVGuJz7lVwtsaPlpg0ltTm0zCviJtEoCVUcxzcjqFyk9Eiik75jW9Rd/vPB1UmilwflTi5gmGv/URrHKPPXpIiuIxm08VCIYPtyZQhCQu7Fvrz2UnyNuArIM7ohrkFwSjVPQvS+WITYxlq9QMCAGDkmQg5GgxXM5uivrp9BSrFthzE6SB87y8M4tc3OVjXYiZYkB5kapUYRGDcTnSHFW4MKSQT2zDZudS3E+BhYqLY/dD7NCFGglo3GLDhOamTx+jPp3bHsf////////////////////8=";

/// Production subgroup order Q = 2^256 - 189, base64 big-endian.
pub(crate) const PRODUCTION_Q_B64: &str = "/////////////////////////////////////////0M=";

/// Production generator G = 2^R mod P (order Q), base64 big-endian.
pub(crate) const PRODUCTION_G_B64: &str = "K7T4+FotZ7KxazcqygHXTGbL5KXixYHZaDnWHTJCAMZlO95+PLBgzVnYKLBziNbSiAEZN2JlGzGjCx1NMX2ZWf9f5fFgMVBLew/pzao3X5PUfMtkpA77gPCNzwTiEYImalCQ7m6rpFQZOQh8u5tRnZt78tREH96NmN+DZ3BnkCFWmZvlkNdv8K3Ucg5E9BZGhhDy4VCncwHOHgu3xmVmZG3ZpTXIe6+s3eOszUKT5EnzAzMW0DsjM2syhbOni98ckERv3c+4lRDjltthaHJ2SfrR6vDaeUurxvQm6J3HOjAAxDxiw/TgC52s4wGamjPlVy3crckIopsGV1qPEW8/GwD87BvW6Kgi4vtTBfcDJf4FiH6vM6Ti+sBqszuOv2LIMzygh5cN1MCMsUIaQ3Mqz1JaLAf0g9qV2rV07qfxv/kO3I6hX01h/mxzieaoLQesY1vzbFlTYSXAjZI+nFQBQ0Deo8RstB+pFQ26/m/joF688xPBbQVYBbAvyG8G8bO3GUugUyvOnOQmESx1a4CB7ttVdWUUSxqK6mlXpPfhrsZkuhRhgJlGG2B1CiJvNa/I/KOxR8aXq3IeYIbVeJvFQqa3Ty5MfeGwfdpJitVWxIr3+1oRe9TJj6/FEVp4WKdEvD+CIezgit4nPLQHHgsWktLBoB53gJWH9w46gLB+ITM=";

/// Production cofactor R = (P - 1) / Q, base64 big-endian.
pub(crate) const PRODUCTION_R_B64: &str = "AQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAC8sXIX99HPeavJ47OYA/L2r0DzQyZymLYtig0XW4urhXro9CgWVBiAbGKw6jY1Wjpz4MdBmFv2oOMTAXm/LwtD4zrYYpI4YbjJ92jEFpUZYAutBgk/lksn4C2GgxIxqRYN5I9NpT2KteaeOGtpS+wa5yLUdXkknVQkdnxcM7kVHgfFwR0QasRG0zC0fbWdNS5HpTFX3gRGGQD2/jYNuJffUxbYfJSucdrQvoS2R8S8+BjCOi1Ou1PHAqXIBi0Z9em1AzqU9/9zL1QSlxKGnZe4yWxBKSGp2GeXcPSZoEHCl8/3nUyRSetsr2e56j3FY9ll86rRN3/yLenD5iBo3Q7WFRw3tPdGNMK9CdqRL9WZ9DM6jSzABWJ9yje61D5ko5YxGcC/40gQoh7nz8Qh1TOYy8epWzv1heWgS3kOL+H+m8Jk/agQn2RUoIL177LzfqI3qinfMg1uqGDEGpBUzNJIdsYlP2Z7+wE5tVMf8wGJlhIC/SsNVadScsf9czQ/eJm8oLNqTEcKZKAJJEyE53zrySQX1bsTvxgWfYAz62wn5K05jb6xTvq+rdU6ikgLTe6wf1Kf1Kf1Kf1Kf1Kf1Kf1Kg==";

/// Test group parameters (16-bit): P = 65267, Q = 32633, G = 3, R = 2.
pub(crate) const TEST_P: u64 = 65267;
pub(crate) const TEST_Q: u64 = 32633;
pub(crate) const TEST_G: u64 = 3;
pub(crate) const TEST_R: u64 = 2;

/// Bit length of the exponent space (Q), used to size pow-radix tables.
pub(crate) const PRODUCTION_Q_BITLEN: u64 = 256;
pub(crate) const TEST_Q_BITLEN: u64 = 16;

/// Largest exponent the memoized discrete-log solver will search before
/// reporting failure.
pub const DLOG_MAX_EXPONENT: u64 = 1_000_000_000;
