//! Single-page dashboard. The browser owns the interaction state and posts
//! every control change to `/api/interact`.

pub fn index_html() -> String {
    r#"<!doctype html>
<html lang="fr">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Comparaison salaire / inflation</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
  <style>
    body { font-family: Arial, sans-serif; max-width: 1200px; margin: 16px auto; padding: 0 12px; }
    h3 { text-align: center; }
    #map { width: 80%; height: 520px; margin: 0 auto; }
    #year { text-align: center; margin: 8px 0; }
    .slider { display: flex; gap: 12px; align-items: center; justify-content: center; }
    .slider input[type=range] { width: 40%; }
    .marks { display: flex; justify-content: space-between; width: 80%; margin: 0 auto; color: #666; font-size: 0.85rem; }
    .chart-row { display: flex; justify-content: center; }
    #graph { width: 85%; height: 450px; }
    .radios { width: 15%; padding-left: 1%; }
    .radios label { display: block; }
    .age-title { padding-top: 5%; }
    #notice { color: #a33; text-align: center; min-height: 1.2em; }
  </style>
</head>
<body>
  <h3>Comparaison salaire / inflation</h3>
  <div id="map"></div>
  <div id="year"></div>
  <div class="slider">
    <input id="start" type="range" step="1" />
    <input id="end" type="range" step="1" />
  </div>
  <div class="marks" id="marks"></div>

  <div class="chart-row">
    <div id="graph"></div>
    <div class="radios">
      <u>Sexe :</u>
      <div id="sex"></div>
      <div class="age-title"><u>Age :</u></div>
      <div id="age"></div>
    </div>
  </div>
  <div id="notice"></div>
  <div id="footnote"></div>

  <script>
    let state = null;
    let slider = null;
    let geojson = null;

    const startEl = document.getElementById('start');
    const endEl = document.getElementById('end');

    async function interact(event) {
      const response = await fetch('/api/interact', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ state, event }),
      });
      const payload = await response.json();
      if (!response.ok) {
        document.getElementById('notice').textContent = payload.message || 'Erreur';
        return;
      }
      state = payload.state;
      if (payload.map) renderMap(payload.map);
      if (payload.chart) renderChart(payload.chart);
    }

    function renderMap(view) {
      document.getElementById('year').textContent = view.label;
      const trace = {
        type: 'choroplethmapbox',
        geojson,
        featureidkey: view.feature_id_key,
        locations: view.locations.map(l => l.location),
        z: view.locations.map(l => l.ratio),
        text: view.locations.map(l => l.name),
        customdata: view.locations.map(l => l.country),
        colorscale: view.color.palette,
        zmin: view.color.min,
        zmax: view.color.max,
        zmid: view.color.midpoint,
        marker: { opacity: view.frame.opacity },
        colorbar: { title: 'Ratio' },
      };
      const layout = {
        title: view.title,
        margin: { l: 0, b: 0, t: 0, r: 0 },
        hovermode: 'closest',
        showlegend: false,
        mapbox: {
          style: view.frame.style,
          zoom: view.frame.zoom,
          center: { lat: view.frame.center_lat, lon: view.frame.center_lon },
        },
      };
      Plotly.react('map', [trace], layout);
    }

    function renderChart(view) {
      document.getElementById('notice').textContent = view.notice || '';
      document.getElementById('footnote').textContent = view.footnote;
      const traces = view.traces.map(t => ({
        x: view.years, y: t.values, mode: 'lines', name: t.name,
      }));
      const layout = {
        title: { text: view.title + '.<br>' + view.location_line, xanchor: 'auto', pad: { t: 0, b: 0, l: 0, r: 0 } },
        height: 450,
        hovermode: 'x unified',
        legend: { title: { text: 'Courbes' } },
        xaxis: { title: view.x_label },
        yaxis: { title: view.y_label },
      };
      Plotly.react('graph', traces, layout);
    }

    function radios(containerId, options, selected, onChange) {
      const container = document.getElementById(containerId);
      for (const option of options) {
        const label = document.createElement('label');
        const input = document.createElement('input');
        input.type = 'radio';
        input.name = containerId;
        input.value = option.value;
        input.checked = option.value === selected;
        input.addEventListener('change', () => onChange(option.value));
        label.appendChild(input);
        label.appendChild(document.createTextNode(' ' + option.label));
        container.appendChild(label);
      }
    }

    function onYearsChanged(moved) {
      let start = Number(startEl.value);
      let end = Number(endEl.value);
      if (end - start < slider.min_span) {
        if (moved === 'start') end = Math.min(slider.max, start + slider.min_span);
        else start = Math.max(slider.min, end - slider.min_span);
        start = Math.min(start, end - slider.min_span);
      }
      startEl.value = start;
      endEl.value = end;
      interact({ type: 'year_range', years: [start, end] });
    }

    async function init() {
      const [controls, boundaries] = await Promise.all([
        fetch('/api/controls').then(r => r.json()),
        fetch('/api/boundaries').then(r => r.json()),
      ]);
      geojson = boundaries;
      slider = controls.years;
      state = controls.initial;

      for (const el of [startEl, endEl]) {
        el.min = slider.min;
        el.max = slider.max;
        el.step = slider.step;
      }
      startEl.value = state.years[0];
      endEl.value = state.years[1];
      startEl.addEventListener('change', () => onYearsChanged('start'));
      endEl.addEventListener('change', () => onYearsChanged('end'));
      document.getElementById('marks').innerHTML =
        slider.marks.map(m => '<span>' + m + '</span>').join('');

      radios('sex', controls.sex, state.sex, sex => interact({ type: 'sex', sex }));
      radios('age', controls.age, state.age, age => interact({ type: 'age', age }));

      await interact({ type: 'load' });
      document.getElementById('map').on('plotly_click', data => {
        const point = data && data.points && data.points[0];
        interact({ type: 'map_click', location: point ? point.location : null });
      });
    }

    init();
  </script>
</body>
</html>
"#
    .to_string()
}
