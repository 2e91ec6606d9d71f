pub const CERTIFICATE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>ConsentShield Certificate - {{SESSION_ID}}</title>
<style>
  body { font-family: Georgia, 'Times New Roman', serif; background: #f4f1ea; margin: 0; padding: 40px 16px; color: #222; }
  .certificate { max-width: 820px; margin: 0 auto; background: #fff; border: 10px double #2c3e50; padding: 48px; }
  h1 { text-align: center; letter-spacing: 2px; margin: 0 0 4px; }
  .subtitle { text-align: center; color: #666; margin-bottom: 32px; }
  .status { text-align: center; font-size: 1.6em; font-weight: bold; padding: 16px; border-radius: 6px; margin-bottom: 12px; }
  .status.verified { background: #e6f6ea; color: #1e7b34; }
  .status.suspicious { background: #fff6dd; color: #8a6100; }
  .status.blocked { background: #fde8e8; color: #a61b1b; }
  .message { text-align: center; font-style: italic; margin-bottom: 32px; }
  table { width: 100%; border-collapse: collapse; margin-bottom: 24px; }
  th { text-align: left; width: 40%; color: #555; font-weight: normal; }
  th, td { padding: 8px; border-bottom: 1px solid #e3e3e3; }
  .hash { font-family: 'Courier New', monospace; word-break: break-all; font-size: 0.9em; }
  footer { text-align: center; color: #777; font-size: 0.85em; margin-top: 32px; }
</style>
</head>
<body>
<div class="certificate">
  <h1>CERTIFICATE OF CONSENT VERIFICATION</h1>
  <div class="subtitle">Issued by {{ISSUER}}</div>

  <div class="status {{STATUS_CLASS}}">{{STATUS_ICON}} {{STATUS}}</div>
  <div class="message">{{STATUS_MESSAGE}}</div>

  <table>
    <tr><th>Session ID</th><td>{{SESSION_ID}}</td></tr>
    <tr><th>Trust Score</th><td>{{TRUST_SCORE}} / 100</td></tr>
    <tr><th>Verified At</th><td>{{TIMESTAMP}}</td></tr>
    <tr><th>Valid Until</th><td>{{VALID_UNTIL}}</td></tr>
  </table>

  <h2>Liveness Checks</h2>
  <table>
    <tr><th>Blink Count</th><td>{{BLINK_COUNT}}</td></tr>
    <tr><th>Emotion</th><td>{{EMOTION_SCORE}}</td></tr>
    <tr><th>Duration (seconds)</th><td>{{DURATION}}</td></tr>
    <tr><th>Face Detected</th><td>{{FACE_DETECTED}}</td></tr>
    <tr><th>Panic Detected</th><td>{{PANIC_DETECTED}}</td></tr>
  </table>

  <h2>Cryptographic Proof</h2>
  <table>
    <tr><th>SHA-256 Hash</th><td class="hash">{{HASH}}</td></tr>
    <tr><th>Short Form</th><td class="hash">{{HASH_PREVIEW}}</td></tr>
  </table>

  <footer>
    Generated {{GENERATION_TIME}} &middot; Certificate version {{VERSION}}<br>
    Recompute the hash over the recorded fields to verify this document has not been altered.
  </footer>
</div>
</body>
</html>
"#;

/// Minimal evidence page: the four hashed fields, the hash and the status.
pub const EVIDENCE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>ConsentShield Evidence - {{SESSION_ID}}</title>
<style>
  body { font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; max-width: 720px; margin: 40px auto; padding: 0 16px; color: #222; }
  .status { font-size: 1.3em; font-weight: bold; padding: 12px; border-radius: 4px; }
  .status.verified { background: #e6f6ea; color: #1e7b34; }
  .status.suspicious { background: #fff6dd; color: #8a6100; }
  .status.blocked { background: #fde8e8; color: #a61b1b; }
  dt { font-weight: bold; margin-top: 12px; }
  dd { margin: 4px 0 0; }
  .hash { font-family: monospace; word-break: break-all; }
  footer { color: #777; font-size: 0.85em; margin-top: 32px; }
</style>
</head>
<body>
<h1>Consent Evidence</h1>
<div class="status {{STATUS_CLASS}}">{{STATUS_ICON}} {{STATUS}}</div>
<dl>
  <dt>Session ID</dt><dd>{{SESSION_ID}}</dd>
  <dt>Phrase</dt><dd>{{PHRASE}}</dd>
  <dt>Timestamp</dt><dd>{{TIMESTAMP}}</dd>
  <dt>Trust Score</dt><dd>{{TRUST_SCORE}}</dd>
  <dt>SHA-256 Hash</dt><dd class="hash">{{HASH}}</dd>
</dl>
<footer>Generated {{GENERATION_TIME}}</footer>
</body>
</html>
"#;
