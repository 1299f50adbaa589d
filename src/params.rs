//! Parameter sets for the cryptosystems.
//!
//! Primes are supplied as decimal-string constants; this crate never generates primes.
//!
//! - `DEMO_*`: the ~1530-bit Paillier primes and the ~3070-bit ElGamal prime used by the
//!   demonstrations.
//! - `TOY_*`: small Mersenne primes ($`2^{89}-1`$, $`2^{107}-1`$, $`2^{127}-1`$) for tests,
//!   benchmarks and quick runs. **Not secure.**

use anyhow::{Context, Result};
use num_bigint::BigUint;

/// First Paillier prime of the demo parameter set.
pub const DEMO_PAILLIER_P: &str = "91384202109071442293463836021112242872202112556997233738650771115304627068435244189452217404518350934650625169787645878831492249234702966702870665364147218752886578786376766042770107058123323172961898496290467790495229761191517699758387645314555098976305458147233083947409856486295027584628343852346198294834673398056518565970306137057662042381108071850367597403128086501769091999204250111973206216989075174484334959172281822465253170809350903328437985069427319";

/// Second Paillier prime of the demo parameter set.
pub const DEMO_PAILLIER_Q: &str = "81461618609951926714232486073323681843605711813586129469089521881286578240351609211470308250561781558375310490543983933780038328473513066035201591085583608631590043360965785867067725207262314428957973642440166838678305658012018727393737744349209249924848069061992265051686526452564260097993214532057415090837113730859560081637862504223208931316591467688041729971515846931082731879867661935144206080893902297595573259652166808407688180529379028374251689469303983";

/// ElGamal prime modulus of the demo parameter set.
pub const DEMO_ELGAMAL_P: &str = "5809605995369958062791915965639201402176612226902900533702900882779736177890990861472094774477339581147373410185646378328043729800750470098210924487866935059164371588168047540943981644516632755067501626434556398193186628990071248660819361205119793693985433297036118232914410171876807536457391277857011849897410207519105333355801121109356897459426271845471397952675959440793493071628394122780510124618488232602464649876850458861245784240929258426287699705312584509625419513463605155428017165714465363094021609290561084025893662561222573202082865797821865270991145082200656978177192827024538990239969175546190770645685893438011714430426409338676314743571154537142031573004276428701433036381801705308659830751190352946025482059931306571004727362479688415574702596946457770284148435989129632853918392117997472632693078113129886487399347796982772784615865232621289656944284216824611318709764535152507354116344703769998514148343807";

/// ElGamal generator of the demo parameter set.
pub const DEMO_ELGAMAL_G: &str = "2";

/// $`2^{89} - 1`$
pub const TOY_PAILLIER_P: &str = "618970019642690137449562111";

/// $`2^{107} - 1`$
pub const TOY_PAILLIER_Q: &str = "162259276829213363391578010288127";

/// $`2^{127} - 1`$
pub const TOY_ELGAMAL_P: &str = "170141183460469231731687303715884105727";

/// Generator used with [TOY_ELGAMAL_P].
pub const TOY_ELGAMAL_G: &str = "3";

/// Parse a decimal constant.
pub fn parse_decimal(s: &str) -> Result<BigUint> {
    BigUint::parse_bytes(s.as_bytes(), 10)
        .with_context(|| {
            let head = s.chars().take(16).collect::<String>();
            format!("not a decimal integer: {}... @{}:{}", head, file!(), line!())
        })
}

/// Which parameter set to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSet {
    /// Small Mersenne primes.
    Toy,
    /// Full-size primes of the demonstrations.
    Demo,
}

impl ParamSet {
    /// Paillier primes $`(p, q)`$.
    pub fn paillier_primes(&self) -> Result<(BigUint, BigUint)> {
        let (p, q) = match self {
            ParamSet::Toy => (TOY_PAILLIER_P, TOY_PAILLIER_Q),
            ParamSet::Demo => (DEMO_PAILLIER_P, DEMO_PAILLIER_Q),
        };

        Ok((parse_decimal(p)?, parse_decimal(q)?))
    }

    /// ElGamal prime and generator $`(p, g)`$.
    pub fn elgamal_group(&self) -> Result<(BigUint, BigUint)> {
        let (p, g) = match self {
            ParamSet::Toy => (TOY_ELGAMAL_P, TOY_ELGAMAL_G),
            ParamSet::Demo => (DEMO_ELGAMAL_P, DEMO_ELGAMAL_G),
        };

        Ok((parse_decimal(p)?, parse_decimal(g)?))
    }
}

#[cfg(test)]
pub(crate) fn toy_paillier_primes() -> (BigUint, BigUint) {
    ParamSet::Toy.paillier_primes().unwrap()
}

#[cfg(test)]
pub(crate) fn toy_elgamal_group() -> (BigUint, BigUint) {
    ParamSet::Toy.elgamal_group().unwrap()
}
