mod field_extractor_tests;

/// A static golf-course home page used across the extractor tests.
pub const FIXTURE_HOME: &str = r#"<html>
<head>
    <title>Cedar Ridge Golf Club - Home</title>
    <meta property="og:site_name" content="Cedar Ridge Golf Club">
</head>
<body>
    <nav>
        <a href="/scorecard">Scorecard</a>
        <a href="/rates">Rates &amp; Specials</a>
        <a href="/about">About Us</a>
        <a href="/membership">Membership</a>
        <a href="/tee-times">Book a Tee Time</a>
        <a href="/dining">Dining</a>
        <a href="https://www.facebook.com/cedarridgegolf">Facebook</a>
        <a href="https://example-ads.com/banner">Ad</a>
    </nav>
    <main>
        <h1>Cedar Ridge Golf Club</h1>
        <p>A championship 18 holes layout carved through the pines, par 72,
           playing 6,850 yards from the back tees.</p>
        <h2>Green Fees</h2>
        <p class="rate-item">Weekday green fee: $45 including cart</p>
        <p class="rate-item">Weekend green fee: $65 including cart</p>
        <table>
            <tr><th>Day</th><th>18 Holes</th><th>9 Holes</th></tr>
            <tr><td>Mon-Fri</td><td>$45</td><td>$28</td></tr>
            <tr><td>Sat-Sun</td><td>$65</td><td>$38</td></tr>
        </table>
        <h2>Amenities</h2>
        <ul>
            <li>Driving range with grass tees</li>
            <li>Full-service pro shop</li>
            <li>Clubhouse restaurant and bar</li>
        </ul>
        <h3>Hours</h3>
        <p class="hours">Open daily 6:30 am to 8:00 pm</p>
        <address>4200 Cedar Ridge Drive, Pinewood, MN 55401</address>
        <p>Call us at (555) 123-4567 or email info@cedarridgegolf.com</p>
    </main>
    <footer>Copyright Cedar Ridge Golf Club</footer>
</body>
</html>"#;
