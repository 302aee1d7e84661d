mod recaptcha;

pub use recaptcha::RecaptchaVerifier;
